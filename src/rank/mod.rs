//! Rank-check lookups: the ordered organic results for a keyword, with a
//! flag on every result whose host matches the configured domain.
//!
//! Exactly one of two interchangeable backends serves a request, chosen once
//! from [`RankSettings`](crate::RankSettings) when the request starts.

pub mod serp_data;
pub mod web_search;

pub use serp_data::SerpDataProvider;
pub use web_search::WebSearchProvider;

use futures::future::try_join_all;
use reqwest::Url;
use tracing::debug;

use crate::config::{RankProviderKind, RankSettings};
use crate::error::{DashboardError, Result};
use crate::models::{RankRequest, RankResult, RankRow, Region};
use crate::DashboardClient;

pub const DEFAULT_TOP_N: usize = 10;
pub const MAX_TOP_N: usize = 100;

/// One organic result as returned by a backend, in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganicResult {
    pub url: String,
    pub title: String,
}

// ---------------------------------------------------------------------------
// RankBackend
// ---------------------------------------------------------------------------

/// The configured rank-check backend.
#[derive(Debug, Clone)]
pub enum RankBackend {
    WebSearch(WebSearchProvider),
    SerpData(SerpDataProvider),
}

impl RankBackend {
    /// Select the backend named by the provider flag.
    ///
    /// Fails with [`DashboardError::NotConfigured`] when the flag is unset or
    /// the selected backend is missing a credential.
    pub fn from_settings(settings: &RankSettings) -> Result<Self> {
        match settings.provider {
            None => Err(DashboardError::NotConfigured(
                "rank provider is not set".to_string(),
            )),
            Some(RankProviderKind::WebSearch) => {
                let key = required(&settings.web_search_key, "web search API key")?;
                let cx = required(&settings.web_search_cx, "web search engine id")?;
                Ok(RankBackend::WebSearch(WebSearchProvider::new(key, cx)))
            }
            Some(RankProviderKind::SerpData) => {
                let key = required(&settings.serp_api_key, "SERP data API key")?;
                Ok(RankBackend::SerpData(SerpDataProvider::new(key)))
            }
        }
    }

    pub fn kind(&self) -> RankProviderKind {
        match self {
            RankBackend::WebSearch(_) => RankProviderKind::WebSearch,
            RankBackend::SerpData(_) => RankProviderKind::SerpData,
        }
    }

    /// Up to `top_n` organic results for `keyword`, best first.
    pub async fn search(
        &self,
        client: &DashboardClient,
        keyword: &str,
        region: &Region,
        top_n: usize,
    ) -> Result<Vec<OrganicResult>> {
        let mut results = match self {
            RankBackend::WebSearch(p) => p.search(client, keyword, region, top_n).await?,
            RankBackend::SerpData(p) => p.search(client, keyword, region, top_n).await?,
        };
        results.truncate(top_n);
        Ok(results)
    }
}

fn required(value: &Option<String>, what: &str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DashboardError::NotConfigured(format!("{what} is not set")))
}

// ---------------------------------------------------------------------------
// RankChecker
// ---------------------------------------------------------------------------

/// Runs rank checks through the configured backend.
pub struct RankChecker<'a> {
    client: &'a DashboardClient,
}

impl<'a> RankChecker<'a> {
    pub fn new(client: &'a DashboardClient) -> Self {
        Self { client }
    }

    /// One result set per keyword, in keyword order.
    ///
    /// Keywords are looked up concurrently; the first failing lookup fails
    /// the whole request.
    pub async fn check(&self, req: &RankRequest) -> Result<Vec<RankResult>> {
        let keywords = normalize_keywords(&req.keywords);
        if keywords.is_empty() {
            return Err(DashboardError::missing(["keywords"]));
        }
        if req.region.country.trim().is_empty() {
            return Err(DashboardError::missing(["region.country"]));
        }
        let top_n = clamp_top_n(req.top_n);
        let backend = RankBackend::from_settings(self.client.rank_settings())?;
        let provider = backend.kind().as_str();
        let domain = req.domain.as_deref().and_then(normalize_host);

        debug!(provider, keywords = keywords.len(), top_n, "rank check");

        let lookups = keywords.iter().map(|keyword| {
            let backend = &backend;
            let domain = domain.as_deref();
            async move {
                let results = backend
                    .search(self.client, keyword, &req.region, top_n)
                    .await?;
                Ok::<_, DashboardError>(RankResult {
                    keyword: keyword.clone(),
                    region: req.region.clone(),
                    rows: to_rows(keyword, provider, domain, results),
                })
            }
        });
        try_join_all(lookups).await
    }

    /// URL of the first organic result for `keyword`, if any.
    pub async fn top_url(&self, keyword: &str, region: &Region) -> Result<Option<String>> {
        let backend = RankBackend::from_settings(self.client.rank_settings())?;
        let results = backend.search(self.client, keyword, region, 1).await?;
        Ok(results.into_iter().next().map(|r| r.url))
    }
}

fn to_rows(
    keyword: &str,
    provider: &str,
    domain: Option<&str>,
    results: Vec<OrganicResult>,
) -> Vec<RankRow> {
    results
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankRow {
            keyword: keyword.to_string(),
            rank: i + 1,
            domain_match: domain
                .map(|d| normalize_host(&r.url).as_deref() == Some(d))
                .unwrap_or(false),
            url: r.url,
            title: r.title,
            provider: provider.to_string(),
        })
        .collect()
}

/// Trimmed, non-empty keywords in request order.
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Clamp the requested result count to `1..=MAX_TOP_N`.
pub fn clamp_top_n(top_n: Option<usize>) -> usize {
    top_n.unwrap_or(DEFAULT_TOP_N).clamp(1, MAX_TOP_N)
}

/// Lower-cased host of a URL or bare domain, without a leading `www.`.
pub fn normalize_host(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let parsed = if input.contains("://") {
        Url::parse(input)
    } else {
        Url::parse(&format!("http://{input}"))
    };
    let host = parsed.ok()?.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    (!host.is_empty()).then_some(host)
}

/// Whether `url`'s host equals `domain`, ignoring case and a `www.` prefix.
pub fn domain_match(url: &str, domain: &str) -> bool {
    match (normalize_host(url), normalize_host(domain)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
