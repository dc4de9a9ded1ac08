use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

pub const ANALYTICS_ADMIN_BASE: &str = "https://analyticsadmin.googleapis.com";
pub const ANALYTICS_DATA_BASE: &str = "https://analyticsdata.googleapis.com";
pub const SEARCH_CONSOLE_BASE: &str = "https://www.googleapis.com/webmasters/v3";
pub const BUSINESS_ACCOUNTS_BASE: &str = "https://mybusinessaccountmanagement.googleapis.com";
pub const BUSINESS_INFO_BASE: &str = "https://mybusinessbusinessinformation.googleapis.com";
pub const BUSINESS_PERFORMANCE_BASE: &str = "https://businessprofileperformance.googleapis.com";
pub const SHEETS_BASE: &str = "https://sheets.googleapis.com";
pub const DRIVE_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const WEB_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
pub const SERP_DATA_URL: &str = "https://serpapi.com/search.json";

/// Tab holding the key/value/timestamp append log.
pub const VAULT_SHEET: &str = "Vault";
/// Tab holding the tracker row log.
pub const TRACKER_SHEET: &str = "Tracker";

pub const VAULT_COLUMNS: &[&str] = &["key", "value", "timestamp"];
pub const TRACKER_COLUMNS: &[&str] = &[
    "runDate",
    "siteUrl",
    "query",
    "page",
    "position",
    "clicks",
    "impressions",
    "location",
    "serpTopUrl",
    "dedupKey",
];

/// Prefix of the per-user spreadsheet name; the user's email follows.
pub const SPREADSHEET_PREFIX: &str = "searchdash - ";

/// File name of the persisted preference blob.
pub const PREFERENCES_FILE: &str = "preferences.json";

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Base URLs of every external service the dashboard talks to.
///
/// The defaults point at the production services. Tests point every field
/// at a single mock server with [`Endpoints::rooted_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub analytics_admin: String,
    pub analytics_data: String,
    pub search_console: String,
    pub business_accounts: String,
    pub business_info: String,
    pub business_performance: String,
    pub sheets: String,
    pub drive: String,
    pub userinfo: String,
    pub web_search: String,
    pub serp_data: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            analytics_admin: ANALYTICS_ADMIN_BASE.to_string(),
            analytics_data: ANALYTICS_DATA_BASE.to_string(),
            search_console: SEARCH_CONSOLE_BASE.to_string(),
            business_accounts: BUSINESS_ACCOUNTS_BASE.to_string(),
            business_info: BUSINESS_INFO_BASE.to_string(),
            business_performance: BUSINESS_PERFORMANCE_BASE.to_string(),
            sheets: SHEETS_BASE.to_string(),
            drive: DRIVE_BASE.to_string(),
            userinfo: USERINFO_URL.to_string(),
            web_search: WEB_SEARCH_URL.to_string(),
            serp_data: SERP_DATA_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at `base`, each under its own path prefix.
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            analytics_admin: format!("{base}/analytics-admin"),
            analytics_data: format!("{base}/analytics-data"),
            search_console: format!("{base}/webmasters/v3"),
            business_accounts: format!("{base}/business-accounts"),
            business_info: format!("{base}/business-info"),
            business_performance: format!("{base}/business-performance"),
            sheets: format!("{base}/sheets"),
            drive: format!("{base}/drive/v3"),
            userinfo: format!("{base}/userinfo"),
            web_search: format!("{base}/customsearch/v1"),
            serp_data: format!("{base}/search.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rank-check provider selection
// ---------------------------------------------------------------------------

/// The two rank-check backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankProviderKind {
    /// Programmable web-search JSON API.
    WebSearch,
    /// SERP-data API.
    SerpData,
}

impl RankProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankProviderKind::WebSearch => "websearch",
            RankProviderKind::SerpData => "serpdata",
        }
    }
}

impl FromStr for RankProviderKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "websearch" | "web_search" | "google" | "cse" => Ok(RankProviderKind::WebSearch),
            "serpdata" | "serp_data" | "serp" | "serpapi" => Ok(RankProviderKind::SerpData),
            other => Err(DashboardError::NotConfigured(format!(
                "unknown rank provider '{other}'"
            ))),
        }
    }
}

/// Credentials and provider flag for the rank-check adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankSettings {
    pub provider: Option<RankProviderKind>,
    pub web_search_key: Option<String>,
    pub web_search_cx: Option<String>,
    pub serp_api_key: Option<String>,
}

/// Platform config directory used by the preference store.
pub fn default_config_dir() -> PathBuf {
    if let Some(config) = dirs::config_dir() {
        config.join("searchdash")
    } else {
        PathBuf::from(".searchdash")
    }
}
