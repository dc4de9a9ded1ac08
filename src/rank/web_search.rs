//! Programmable web-search JSON API backend.
//!
//! The API returns at most 10 results per call, so deeper result lists are
//! read page by page with the 1-based `start` offset.

use serde::Deserialize;

use super::OrganicResult;
use crate::error::Result;
use crate::http::get_json;
use crate::models::Region;
use crate::DashboardClient;

const PAGE_SIZE: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchItem {
    link: String,
    title: String,
}

#[derive(Debug, Clone)]
pub struct WebSearchProvider {
    api_key: String,
    engine_id: String,
}

impl WebSearchProvider {
    pub fn new(api_key: String, engine_id: String) -> Self {
        Self { api_key, engine_id }
    }

    pub async fn search(
        &self,
        client: &DashboardClient,
        keyword: &str,
        region: &Region,
        top_n: usize,
    ) -> Result<Vec<OrganicResult>> {
        let url = &client.endpoints().web_search;
        let country = region.country.trim().to_ascii_lowercase();
        let mut results = Vec::with_capacity(top_n);

        while results.len() < top_n {
            let num = (top_n - results.len()).min(PAGE_SIZE);
            let query = [
                ("key", self.api_key.clone()),
                ("cx", self.engine_id.clone()),
                ("q", keyword.to_string()),
                ("num", num.to_string()),
                ("start", (results.len() + 1).to_string()),
                ("gl", country.clone()),
            ];
            let page: SearchResponse = get_json(client.http(), url, None, &query).await?;
            let received = page.items.len();
            results.extend(page.items.into_iter().map(|item| OrganicResult {
                url: item.link,
                title: item.title,
            }));
            if received < num {
                break;
            }
        }
        Ok(results)
    }
}
