//! SERP-data API backend. One call returns the whole organic result list.

use serde::Deserialize;

use super::OrganicResult;
use crate::error::{DashboardError, Result};
use crate::http::get_json;
use crate::models::Region;
use crate::regions;
use crate::DashboardClient;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerpResponse {
    organic_results: Vec<SerpResult>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerpResult {
    position: Option<u32>,
    link: String,
    title: String,
}

#[derive(Debug, Clone)]
pub struct SerpDataProvider {
    api_key: String,
}

impl SerpDataProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    pub async fn search(
        &self,
        client: &DashboardClient,
        keyword: &str,
        region: &Region,
        top_n: usize,
    ) -> Result<Vec<OrganicResult>> {
        let mut query = vec![
            ("engine", "google".to_string()),
            ("q", keyword.to_string()),
            ("num", top_n.to_string()),
            ("gl", region.country.trim().to_ascii_lowercase()),
            ("hl", "en".to_string()),
            ("api_key", self.api_key.clone()),
        ];
        if let Some(location) = location_param(region) {
            query.push(("location", location));
        }

        let resp: SerpResponse =
            get_json(client.http(), &client.endpoints().serp_data, None, &query).await?;

        if let Some(error) = resp.error {
            // "no results" is reported as an error body with a 200 status.
            if resp.organic_results.is_empty() && !error.contains("returned any results") {
                return Err(DashboardError::Upstream {
                    status: 502,
                    message: error,
                });
            }
        }

        let mut results = resp.organic_results;
        results.sort_by_key(|r| r.position.unwrap_or(u32::MAX));
        Ok(results
            .into_iter()
            .map(|r| OrganicResult {
                url: r.link,
                title: r.title,
            })
            .collect())
    }
}

/// `"<state>, <country name>"` when a state is given.
fn location_param(region: &Region) -> Option<String> {
    let state = region.state.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    let country = regions::country(&region.country)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| region.country.trim().to_string());
    Some(format!("{state}, {country}"))
}
