use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SessionPoint — one day of traffic-analytics sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPoint {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub sessions: u64,
}

// ---------------------------------------------------------------------------
// SearchPoint — one day of search-console performance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPoint {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub impressions: u64,
    /// Click-through rate as a fraction in `[0, 1]`.
    #[serde(default)]
    pub ctr_fraction: f64,
    #[serde(default)]
    pub position: f64,
}

// ---------------------------------------------------------------------------
// MergedRow — both sources reconciled on date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub clicks: u64,
    /// Click-through rate as a percentage, rounded to 2 decimals.
    #[serde(default)]
    pub ctr: f64,
    /// Trailing 7-point moving average of `sessions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<u64>,
}
