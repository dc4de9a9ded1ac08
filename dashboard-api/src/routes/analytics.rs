use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/properties`: analytics properties visible to the caller.
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, AppError> {
    let page = state.client.analytics(&token).list_properties().await?;
    Ok(Json(json!({ "data": page.items, "truncated": page.truncated })))
}

/// `GET /api/sites`: search-console sites visible to the caller.
pub async fn list_sites(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, AppError> {
    let sites = state.client.search_console(&token).list_sites().await?;
    Ok(Json(json!({ "data": sites })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, get, json_body, send};

    #[tokio::test]
    async fn properties_require_a_bearer_token() {
        let resp = send(app(), get("/api/properties", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "Not authenticated");
    }

    #[tokio::test]
    async fn sites_require_a_bearer_token() {
        let resp = send(app(), get("/api/sites", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
