//! Shared fixtures for the searchdash integration tests.
//!
//! Every external service is served by one wiremock `MockServer`, each under
//! its own path prefix (see `Endpoints::rooted_at`).

#![allow(dead_code)]

use searchdash::models::{MergedRow, SearchPoint, SessionPoint};
use searchdash::{DashboardClient, Endpoints, RankProviderKind, RankSettings};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Client pointed at `server` with no rank provider configured.
pub fn client(server: &MockServer) -> DashboardClient {
    client_with_rank(server, RankSettings::default())
}

pub fn client_with_rank(server: &MockServer, rank: RankSettings) -> DashboardClient {
    DashboardClient::builder()
        .endpoints(Endpoints::rooted_at(&server.uri()))
        .rank_settings(rank)
        .build()
        .unwrap()
}

pub fn web_search_settings() -> RankSettings {
    RankSettings {
        provider: Some(RankProviderKind::WebSearch),
        web_search_key: Some("ws-key".into()),
        web_search_cx: Some("ws-cx".into()),
        serp_api_key: None,
    }
}

pub fn serp_data_settings() -> RankSettings {
    RankSettings {
        provider: Some(RankProviderKind::SerpData),
        web_search_key: None,
        web_search_cx: None,
        serp_api_key: Some("serp-key".into()),
    }
}

pub fn session(date: &str, sessions: u64) -> SessionPoint {
    SessionPoint {
        date: date.into(),
        sessions,
    }
}

pub fn search(date: &str, clicks: u64, ctr_fraction: f64) -> SearchPoint {
    SearchPoint {
        date: date.into(),
        clicks,
        impressions: 0,
        ctr_fraction,
        position: 0.0,
    }
}

pub fn row(date: &str, sessions: u64, clicks: u64, ctr: f64) -> MergedRow {
    MergedRow {
        date: date.into(),
        sessions,
        clicks,
        ctr,
        moving_average: None,
    }
}

/// `n` consecutive January days starting at the 1st, with constant metrics.
pub fn flat_rows(n: u32, sessions: u64, clicks: u64, ctr: f64) -> Vec<MergedRow> {
    (1..=n)
        .map(|d| row(&format!("2024-01-{d:02}"), sessions, clicks, ctr))
        .collect()
}
