use serde::{Deserialize, Serialize};

/// Country plus optional state/province a rank check is localized to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Region {
    pub fn label(&self) -> String {
        match self.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(state) => format!("{state}, {}", self.country),
            None => self.country.clone(),
        }
    }
}

/// Rank-check request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub region: Region,
    #[serde(default, rename = "topN")]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub domain: Option<String>,
}

// ---------------------------------------------------------------------------
// RankRow — one organic result for a keyword
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRow {
    pub keyword: String,
    /// 1-based position in the result list.
    pub rank: usize,
    pub url: String,
    pub title: String,
    pub provider: String,
    pub domain_match: bool,
}

/// All rows for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResult {
    pub keyword: String,
    pub region: Region,
    pub rows: Vec<RankRow>,
}
