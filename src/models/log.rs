use serde::{Deserialize, Serialize};

use super::Region;
use crate::dates::DateRange;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// VaultEntry — one row of the key/value append log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    pub key: String,
    pub value: String,
    pub timestamp: String,
}

impl VaultEntry {
    pub fn to_row(&self) -> Vec<String> {
        vec![self.key.clone(), self.value.clone(), self.timestamp.clone()]
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Parameters of a tracker run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerRequest {
    #[serde(default)]
    pub site_url: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Query substrings; one search-console call per filter.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub location: Option<Region>,
    #[serde(default, rename = "topN")]
    pub top_n: Option<usize>,
}

impl TrackerRequest {
    /// Check the required fields and parse the date range.
    ///
    /// Every missing field is named in one error.
    pub fn validate(&self) -> Result<DateRange> {
        let mut missing = Vec::new();
        if self.site_url.trim().is_empty() {
            missing.push("siteUrl");
        }
        if self.start_date.trim().is_empty() {
            missing.push("startDate");
        }
        if self.end_date.trim().is_empty() {
            missing.push("endDate");
        }
        if !missing.is_empty() {
            return Err(DashboardError::missing(missing));
        }
        DateRange::parse(&self.start_date, &self.end_date)
    }
}

/// One row of the tracker log, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerRow {
    pub run_date: String,
    pub site_url: String,
    pub query: String,
    pub page: String,
    pub position: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub location: String,
    pub serp_top_url: String,
    pub dedup_key: String,
}

impl TrackerRow {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.run_date.clone(),
            self.site_url.clone(),
            self.query.clone(),
            self.page.clone(),
            format!("{:.2}", self.position),
            self.clicks.to_string(),
            self.impressions.to_string(),
            self.location.clone(),
            self.serp_top_url.clone(),
            self.dedup_key.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerRunSummary {
    pub appended: usize,
    pub message: String,
}
