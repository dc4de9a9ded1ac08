pub mod analytics;
pub mod business;
pub mod insight;
pub mod rank;
pub mod regions;
pub mod series;
pub mod settings;
pub mod tracker;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use searchdash::dates::{DatePreset, DateRange};
use searchdash::DashboardError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Every API route, with tracing and permissive CORS applied.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/regions", get(regions::get_regions))
        .route("/api/properties", get(analytics::list_properties))
        .route("/api/sites", get(analytics::list_sites))
        .route("/api/series", get(series::get_series))
        .route("/api/series/export", get(series::export_series))
        .route("/api/insight", post(insight::post_insight))
        .route("/api/rank-check", post(rank::post_rank_check))
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::save_setting),
        )
        .route("/api/tracker/run", post(tracker::run_tracker))
        .route("/api/business/accounts", get(business::list_accounts))
        .route("/api/business/locations", get(business::list_locations))
        .route("/api/business/metrics", get(business::get_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Non-empty trimmed value of an optional query parameter.
pub(crate) fn param(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve a date range from explicit dates or a preset.
///
/// Explicit dates win. A non-custom preset is used only when both dates are
/// absent; otherwise each missing date is reported.
pub(crate) fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    preset: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange, DashboardError> {
    match (start, end) {
        (Some(s), Some(e)) => DateRange::parse(s, e),
        (None, None) => preset
            .and_then(DatePreset::parse)
            .and_then(|p| DateRange::for_preset(p, today))
            .ok_or_else(|| DashboardError::missing(["startDate", "endDate"])),
        (None, Some(_)) => Err(DashboardError::missing(["startDate"])),
        (Some(_), None) => Err(DashboardError::missing(["endDate"])),
    }
}
