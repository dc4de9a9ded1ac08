use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use searchdash::DashboardClient;
use serde::Deserialize;
use serde_json::{json, Value};

use super::param;
use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SettingsParams {
    /// Comma-separated keys; all keys when absent.
    pub key: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveSetting {
    #[serde(default)]
    pub key: String,
    pub value: Option<String>,
}

/// Spreadsheet id for the signed-in user, created on first use.
async fn open_vault(client: &DashboardClient, token: &str) -> Result<String, AppError> {
    let user = client.identity(token).user_info().await?;
    Ok(client.vault(token).open(&user.email).await?)
}

/// `GET /api/settings`: latest value per key from the vault.
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Query(params): Query<SettingsParams>,
) -> Result<Json<Value>, AppError> {
    let keys: Option<Vec<String>> = param(&params.key).map(|k| {
        k.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    });
    let spreadsheet_id = open_vault(&state.client, &token).await?;
    let values = state
        .client
        .vault(&token)
        .load(&spreadsheet_id, keys.as_deref())
        .await?;
    Ok(Json(json!({ "values": values, "spreadsheetId": spreadsheet_id })))
}

/// `POST /api/settings`: append a new value for a key.
pub async fn save_setting(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    payload: Result<Json<SaveSetting>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload?;
    let mut missing = Vec::new();
    if body.key.trim().is_empty() {
        missing.push("key");
    }
    if body.value.is_none() {
        missing.push("value");
    }
    if !missing.is_empty() {
        return Err(searchdash::DashboardError::missing(missing).into());
    }
    let value = body.value.unwrap_or_default();

    let spreadsheet_id = open_vault(&state.client, &token).await?;
    state
        .client
        .vault(&token)
        .save(&spreadsheet_id, &body.key, &value)
        .await?;
    Ok(Json(json!({ "ok": true, "spreadsheetId": spreadsheet_id })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, get, json_body, post, send};

    #[tokio::test]
    async fn settings_require_a_bearer_token() {
        let resp = send(app(), get("/api/settings", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn save_names_missing_fields() {
        let resp = send(app(), post("/api/settings", Some("tok"), "{}")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let msg = json_body(resp).await["error"].as_str().unwrap().to_string();
        assert!(msg.contains("key, value"));
    }
}
