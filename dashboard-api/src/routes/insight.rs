use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use searchdash::models::MergedRow;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    #[serde(default)]
    pub rows: Vec<MergedRow>,
}

/// `POST /api/insight`: a one-paragraph summary of the last two weeks.
///
/// Never fails: an unreadable body yields an empty summary.
pub async fn post_insight(payload: Result<Json<InsightRequest>, JsonRejection>) -> Json<Value> {
    let summary = match payload {
        Ok(Json(req)) => searchdash::series::summarize(&req.rows),
        Err(rejection) => {
            debug!(error = %rejection, "unreadable insight request");
            String::new()
        }
    };
    Json(json!({ "summary": summary }))
}
