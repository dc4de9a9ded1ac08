use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use searchdash::models::TrackerRequest;
use serde_json::{json, Value};

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/tracker/run`: snapshot query/page performance into the
/// caller's tracker log.
pub async fn run_tracker(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    payload: Result<Json<TrackerRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let client = &state.client;
    let user = client.identity(&token).user_info().await?;
    let spreadsheet_id = client.vault(&token).open(&user.email).await?;
    let summary = client.tracker(&token).run(&spreadsheet_id, &req).await?;
    Ok(Json(json!({
        "ok": true,
        "appended": summary.appended,
        "message": summary.message,
    })))
}
