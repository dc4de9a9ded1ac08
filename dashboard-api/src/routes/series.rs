use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json};
use chrono::Utc;
use searchdash::dates::DateRange;
use searchdash::models::MergedRow;
use searchdash::DashboardError;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{param, resolve_range};
use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesParams {
    pub property_id: Option<String>,
    pub site_url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub preset: Option<String>,
}

impl SeriesParams {
    /// Property, site and range, naming every missing field at once.
    fn resolve(&self) -> Result<(&str, &str, DateRange), DashboardError> {
        let property = param(&self.property_id);
        let site = param(&self.site_url);
        let range = resolve_range(
            param(&self.start_date),
            param(&self.end_date),
            param(&self.preset),
            Utc::now().date_naive(),
        );

        let mut missing: Vec<String> = Vec::new();
        if property.is_none() {
            missing.push("propertyId".into());
        }
        if site.is_none() {
            missing.push("siteUrl".into());
        }
        match (property, site, range) {
            (Some(p), Some(s), Ok(range)) => Ok((p, s, range)),
            (_, _, Err(DashboardError::MissingFields(more))) => {
                missing.extend(more);
                Err(DashboardError::MissingFields(missing))
            }
            (_, _, Err(e)) if missing.is_empty() => Err(e),
            _ => Err(DashboardError::MissingFields(missing)),
        }
    }
}

async fn fetch(state: &AppState, token: &str, params: &SeriesParams) -> Result<Vec<MergedRow>, AppError> {
    let (property, site, range) = params.resolve()?;
    Ok(state
        .client
        .combined_series(token, property, site, &range)
        .await?)
}

/// `GET /api/series`: merged daily sessions and search performance.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Query(params): Query<SeriesParams>,
) -> Result<Json<Value>, AppError> {
    let series = fetch(&state, &token, &params).await?;
    Ok(Json(json!({ "series": series })))
}

/// `GET /api/series/export`: the same series as a CSV download.
pub async fn export_series(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Query(params): Query<SeriesParams>,
) -> Result<impl IntoResponse, AppError> {
    let series = fetch(&state, &token, &params).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"series.csv\"",
            ),
        ],
        searchdash::csv::series_to_csv(&series),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, get, json_body, send};

    #[tokio::test]
    async fn missing_bearer_is_401() {
        let resp = send(app(), get("/api/series?propertyId=1&siteUrl=x", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "Not authenticated");
    }

    #[tokio::test]
    async fn missing_params_are_named() {
        let resp = send(app(), get("/api/series", Some("tok"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        let msg = body["error"].as_str().unwrap();
        for field in ["propertyId", "siteUrl", "startDate", "endDate"] {
            assert!(msg.contains(field), "{msg} should name {field}");
        }
    }

    #[tokio::test]
    async fn inverted_range_is_400() {
        let uri = "/api/series?propertyId=1&siteUrl=x&startDate=2024-02-01&endDate=2024-01-01";
        let resp = send(app(), get(uri, Some("tok"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_validates_like_series() {
        let resp = send(app(), get("/api/series/export?preset=last28d", Some("tok"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        let msg = body["error"].as_str().unwrap();
        assert!(msg.contains("propertyId"));
        assert!(!msg.contains("startDate"));
    }
}
