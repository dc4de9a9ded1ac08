use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use searchdash::models::RankRequest;
use serde_json::{json, Value};

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/rank-check`: organic results per keyword for a region.
pub async fn post_rank_check(
    State(state): State<Arc<AppState>>,
    _token: BearerToken,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let data = state.client.rank_check().check(&req).await?;
    Ok(Json(json!({ "ok": true, "data": data })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use searchdash::{RankProviderKind, RankSettings};

    use crate::routes::test_support::{app, app_with, json_body, post, send};

    const BODY: &str = r#"{"keywords":["plumber"],"region":{"country":"US"},"topN":5}"#;

    #[tokio::test]
    async fn unconfigured_provider_is_400() {
        let resp = send(app(), post("/api/rank-check", Some("tok"), BODY)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn provider_without_key_is_400() {
        let rank = RankSettings {
            provider: Some(RankProviderKind::SerpData),
            ..Default::default()
        };
        let resp = send(app_with(rank), post("/api/rank-check", Some("tok"), BODY)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_keywords_are_named() {
        let body = r#"{"keywords":["  "],"region":{"country":"US"}}"#;
        let resp = send(app(), post("/api/rank-check", Some("tok"), body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let msg = json_body(resp).await["error"].as_str().unwrap().to_string();
        assert!(msg.contains("keywords"));
    }

    #[tokio::test]
    async fn malformed_body_is_400_json() {
        let resp = send(app(), post("/api/rank-check", Some("tok"), "{not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(resp).await["error"].is_string());
    }
}
