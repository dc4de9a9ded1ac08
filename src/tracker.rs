//! Tracker runs: snapshot search-console (query, page) performance into the
//! `Tracker` tab of the user's spreadsheet.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, Utc};
use futures::future::try_join_all;
use tracing::{info, warn};

use crate::adapters::QueryPageFilter;
use crate::config::TRACKER_SHEET;
use crate::dates::{DateRange, ISO_DAY};
use crate::error::{DashboardError, Result};
use crate::models::{QueryPageRow, Region, TrackerRequest, TrackerRow, TrackerRunSummary};
use crate::rank::{clamp_top_n, normalize_keywords, RankBackend};
use crate::regions;
use crate::DashboardClient;

/// Composite of the request parameters, used to correlate repeated runs.
pub fn dedup_key(req: &TrackerRequest) -> String {
    let filters: BTreeSet<String> = req
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    let filters: Vec<String> = filters.into_iter().collect();
    format!(
        "{}|{}|{}|{}|{}|{}",
        req.site_url.trim(),
        req.start_date,
        req.end_date,
        filters.join(";"),
        location_label(req.location.as_ref()),
        clamp_top_n(req.top_n)
    )
}

fn location_label(location: Option<&Region>) -> String {
    location
        .filter(|l| !l.country.trim().is_empty())
        .map(Region::label)
        .unwrap_or_default()
}

/// Turn fetched rows into tracker log rows.
///
/// `serp_top` maps a query to the top organic URL looked up for it.
pub fn build_rows(
    req: &TrackerRequest,
    run_date: NaiveDate,
    rows: &[QueryPageRow],
    serp_top: &HashMap<String, String>,
) -> Vec<TrackerRow> {
    let key = dedup_key(req);
    let location = location_label(req.location.as_ref());
    let run_date = run_date.format(ISO_DAY).to_string();

    rows.iter()
        .map(|r| TrackerRow {
            run_date: run_date.clone(),
            site_url: req.site_url.trim().to_string(),
            query: r.query.clone(),
            page: r.page.clone(),
            position: r.position,
            clicks: r.clicks,
            impressions: r.impressions,
            location: location.clone(),
            serp_top_url: serp_top.get(&r.query).cloned().unwrap_or_default(),
            dedup_key: key.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

pub struct Tracker<'a> {
    client: &'a DashboardClient,
    token: &'a str,
}

impl<'a> Tracker<'a> {
    pub fn new(client: &'a DashboardClient, token: &'a str) -> Self {
        Self { client, token }
    }

    /// Fetch, enrich and append one run to `spreadsheet_id`.
    pub async fn run(
        &self,
        spreadsheet_id: &str,
        req: &TrackerRequest,
    ) -> Result<TrackerRunSummary> {
        let range = req.validate()?;

        let rows = self.fetch_rows(req, &range).await?;
        let serp_top = self.lookup_top_urls(req, &rows).await?;
        let tracker_rows = build_rows(req, Utc::now().date_naive(), &rows, &serp_top);

        let values: Vec<Vec<String>> = tracker_rows.iter().map(TrackerRow::to_row).collect();
        let appended = self
            .client
            .sheets(self.token)
            .append_rows(spreadsheet_id, TRACKER_SHEET, &values)
            .await?;

        info!(site = %req.site_url, appended, "tracker run appended");
        Ok(TrackerRunSummary {
            appended,
            message: format!("Appended {appended} row(s) to {TRACKER_SHEET}"),
        })
    }

    /// One query per keyword filter, or a single unfiltered query.
    async fn fetch_rows(&self, req: &TrackerRequest, range: &DateRange) -> Result<Vec<QueryPageRow>> {
        let top_n = clamp_top_n(req.top_n);
        let country = req
            .location
            .as_ref()
            .and_then(|l| regions::country(&l.country))
            .map(|c| c.alpha3);
        let keywords = normalize_keywords(&req.keywords);
        let filters: Vec<Option<&str>> = if keywords.is_empty() {
            vec![None]
        } else {
            keywords.iter().map(|k| Some(k.as_str())).collect()
        };

        let search_console = self.client.search_console(self.token);
        let mut rows = Vec::new();
        for query_contains in filters {
            let filter = QueryPageFilter {
                query_contains,
                country,
                row_limit: top_n,
            };
            rows.extend(
                search_console
                    .query_pages(&req.site_url, range, &filter)
                    .await?,
            );
        }
        Ok(rows)
    }

    /// Top organic URL per distinct query, when a rank backend is configured.
    async fn lookup_top_urls(
        &self,
        req: &TrackerRequest,
        rows: &[QueryPageRow],
    ) -> Result<HashMap<String, String>> {
        let settings = self.client.rank_settings();
        let backend = match RankBackend::from_settings(settings) {
            Ok(backend) => backend,
            Err(e) => {
                if settings.provider.is_some() {
                    warn!(error = %e, "rank provider unusable; serpTopUrl left empty");
                }
                return Ok(HashMap::new());
            }
        };
        let region = req.location.clone().unwrap_or_else(|| Region {
            country: "US".to_string(),
            state: None,
        });
        let queries: BTreeSet<&str> = rows.iter().map(|r| r.query.as_str()).collect();

        let lookups = queries.into_iter().map(|query| {
            let backend = &backend;
            let region = &region;
            async move {
                let top = backend.search(self.client, query, region, 1).await?;
                Ok::<_, DashboardError>((query.to_string(), top.into_iter().next().map(|r| r.url)))
            }
        });
        Ok(try_join_all(lookups)
            .await?
            .into_iter()
            .filter_map(|(q, url)| url.map(|u| (q, u)))
            .collect())
    }
}
