//! Search-console adapter: site list and search analytics queries.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::dates::DateRange;
use crate::error::{DashboardError, Result};
use crate::http::{get_json, post_json};
use crate::models::{QueryPageRow, SearchPoint, Site};
use crate::DashboardClient;

/// Largest row count a single search analytics query may return.
pub const MAX_ROW_LIMIT: usize = 25_000;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SitesResponse {
    site_entry: Vec<SiteEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SiteEntry {
    site_url: String,
    permission_level: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryResponse {
    rows: Vec<QueryRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryRow {
    keys: Vec<String>,
    clicks: f64,
    impressions: f64,
    ctr: f64,
    position: f64,
}

/// Filters for a (query, page) performance query.
#[derive(Debug, Clone, Default)]
pub struct QueryPageFilter<'f> {
    /// Only queries containing this substring.
    pub query_contains: Option<&'f str>,
    /// Lower-case ISO alpha-3 country code.
    pub country: Option<&'f str>,
    pub row_limit: usize,
}

// ---------------------------------------------------------------------------
// SearchConsoleApi
// ---------------------------------------------------------------------------

/// Query interface for the search-console API.
pub struct SearchConsoleApi<'a> {
    client: &'a DashboardClient,
    token: &'a str,
}

impl<'a> SearchConsoleApi<'a> {
    pub fn new(client: &'a DashboardClient, token: &'a str) -> Self {
        Self { client, token }
    }

    /// List the sites the user has access to.
    pub async fn list_sites(&self) -> Result<Vec<Site>> {
        let url = format!("{}/sites", self.client.endpoints().search_console);
        let resp: SitesResponse = get_json(self.client.http(), &url, Some(self.token), &[]).await?;
        Ok(resp
            .site_entry
            .into_iter()
            .map(|s| Site {
                site_url: s.site_url,
                permission_level: s.permission_level,
            })
            .collect())
    }

    /// Clicks, impressions, CTR and position per day.
    pub async fn daily_performance(
        &self,
        site_url: &str,
        range: &DateRange,
    ) -> Result<Vec<SearchPoint>> {
        let body = json!({
            "startDate": range.start_date,
            "endDate": range.end_date,
            "dimensions": ["date"],
            "rowLimit": MAX_ROW_LIMIT,
        });
        let rows = self.query(site_url, &body).await?;

        Ok(rows
            .into_iter()
            .map(|r| SearchPoint {
                date: r.keys.into_iter().next().unwrap_or_default(),
                clicks: count(r.clicks),
                impressions: count(r.impressions),
                ctr_fraction: r.ctr,
                position: r.position,
            })
            .collect())
    }

    /// Performance broken down by (query, page).
    pub async fn query_pages(
        &self,
        site_url: &str,
        range: &DateRange,
        filter: &QueryPageFilter<'_>,
    ) -> Result<Vec<QueryPageRow>> {
        let mut filters = Vec::new();
        if let Some(q) = filter.query_contains.map(str::trim).filter(|q| !q.is_empty()) {
            filters.push(json!({ "dimension": "query", "operator": "contains", "expression": q }));
        }
        if let Some(c) = filter.country.filter(|c| !c.is_empty()) {
            filters.push(json!({ "dimension": "country", "operator": "equals", "expression": c }));
        }

        let mut body = json!({
            "startDate": range.start_date,
            "endDate": range.end_date,
            "dimensions": ["query", "page"],
            "rowLimit": filter.row_limit.clamp(1, MAX_ROW_LIMIT),
        });
        if !filters.is_empty() {
            body["dimensionFilterGroups"] = json!([{ "filters": filters }]);
        }

        let rows = self.query(site_url, &body).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let mut keys = r.keys.into_iter();
                QueryPageRow {
                    query: keys.next().unwrap_or_default(),
                    page: keys.next().unwrap_or_default(),
                    clicks: count(r.clicks),
                    impressions: count(r.impressions),
                    ctr: r.ctr,
                    position: r.position,
                }
            })
            .collect())
    }

    async fn query(&self, site_url: &str, body: &Value) -> Result<Vec<QueryRow>> {
        let site = site_url.trim();
        if site.is_empty() {
            return Err(DashboardError::missing(["siteUrl"]));
        }
        let url = format!(
            "{}/sites/{}/searchAnalytics/query",
            self.client.endpoints().search_console,
            urlencoding::encode(site)
        );
        let resp: QueryResponse =
            post_json(self.client.http(), &url, Some(self.token), &[], body).await?;
        Ok(resp.rows)
    }
}

fn count(v: f64) -> u64 {
    v.max(0.0).round() as u64
}
