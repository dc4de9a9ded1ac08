//! Date-range helpers.
//!
//! All ranges are inclusive and carried as ISO day strings (`YYYY-MM-DD`),
//! which is what every reporting API expects.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

pub const ISO_DAY: &str = "%Y-%m-%d";

/// Date-range preset selectable in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatePreset {
    #[default]
    #[serde(rename = "last28d")]
    Last28d,
    #[serde(rename = "last60d")]
    Last60d,
    #[serde(rename = "last90d")]
    Last90d,
    #[serde(rename = "custom")]
    Custom,
}

impl DatePreset {
    /// Number of days covered, or `None` for [`DatePreset::Custom`].
    pub fn days(&self) -> Option<i64> {
        match self {
            DatePreset::Last28d => Some(28),
            DatePreset::Last60d => Some(60),
            DatePreset::Last90d => Some(90),
            DatePreset::Custom => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "last28d" => Some(DatePreset::Last28d),
            "last60d" => Some(DatePreset::Last60d),
            "last90d" => Some(DatePreset::Last90d),
            "custom" => Some(DatePreset::Custom),
            _ => None,
        }
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    /// Validate and build a range from two ISO day strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let s = parse_day(start)?;
        let e = parse_day(end)?;
        if s > e {
            return Err(DashboardError::InvalidArgument(format!(
                "startDate {start} is after endDate {end}"
            )));
        }
        Ok(Self::from_days(s, e))
    }

    pub fn from_days(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: start.format(ISO_DAY).to_string(),
            end_date: end.format(ISO_DAY).to_string(),
        }
    }

    /// Range for a preset relative to `today`; `None` for custom.
    pub fn for_preset(preset: DatePreset, today: NaiveDate) -> Option<Self> {
        preset.days().map(|n| last_n_days(n, today))
    }
}

/// The `n` days ending yesterday.
///
/// Today is excluded since reporting APIs only have partial data for it.
pub fn last_n_days(n: i64, today: NaiveDate) -> DateRange {
    let n = n.max(1);
    let end = today - Duration::days(1);
    let start = today - Duration::days(n);
    DateRange::from_days(start, end)
}

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DAY)
        .map_err(|_| DashboardError::InvalidArgument(format!("'{s}' is not a YYYY-MM-DD date")))
}

/// Convert an analytics report date (`20240101`) to `2024-01-01`.
///
/// Anything that is not exactly eight ASCII digits is returned unchanged.
pub fn compact_to_iso(s: &str) -> String {
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &s[0..4], &s[4..6], &s[6..8])
    } else {
        s.to_string()
    }
}
