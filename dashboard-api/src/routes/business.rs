use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Utc;
use searchdash::DashboardError;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{param, resolve_range};
use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LocationsParams {
    pub account: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsParams {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub preset: Option<String>,
    /// Comma-separated metric names; the default set when absent.
    pub metrics: Option<String>,
}

/// `GET /api/business/accounts`
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, AppError> {
    let page = state.client.business_profile(&token).list_accounts().await?;
    Ok(Json(json!({ "data": page.items, "truncated": page.truncated })))
}

/// `GET /api/business/locations?account=accounts/<id>`
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Query(params): Query<LocationsParams>,
) -> Result<Json<Value>, AppError> {
    let account = param(&params.account).ok_or_else(|| DashboardError::missing(["account"]))?;
    let page = state
        .client
        .business_profile(&token)
        .list_locations(account)
        .await?;
    Ok(Json(json!({ "data": page.items, "truncated": page.truncated })))
}

/// `GET /api/business/metrics?location=locations/<id>&startDate=&endDate=`
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Query(params): Query<MetricsParams>,
) -> Result<Json<Value>, AppError> {
    let location = param(&params.location);
    let range = resolve_range(
        param(&params.start_date),
        param(&params.end_date),
        param(&params.preset),
        Utc::now().date_naive(),
    );
    let (location, range) = match (location, range) {
        (Some(l), Ok(r)) => (l, r),
        (None, Err(DashboardError::MissingFields(more))) => {
            let mut missing = vec!["location".to_string()];
            missing.extend(more);
            return Err(DashboardError::MissingFields(missing).into());
        }
        (None, _) => return Err(DashboardError::missing(["location"]).into()),
        (Some(_), Err(e)) => return Err(e.into()),
    };
    let metrics: Vec<&str> = param(&params.metrics)
        .map(|m| m.split(',').map(str::trim).filter(|m| !m.is_empty()).collect())
        .unwrap_or_default();

    let data = state
        .client
        .business_profile(&token)
        .daily_metrics(location, &range, &metrics)
        .await?;
    Ok(Json(json!({ "data": data })))
}
