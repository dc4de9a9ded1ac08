use axum::extract::Query;
use axum::response::Json;
use searchdash::DashboardError;
use serde::Deserialize;
use serde_json::{json, Value};

use super::param;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct RegionsParams {
    pub country: Option<String>,
}

/// `GET /api/regions`: the country list, or one country's region options.
pub async fn get_regions(Query(params): Query<RegionsParams>) -> Result<Json<Value>, AppError> {
    let Some(code) = param(&params.country) else {
        return Ok(Json(json!({ "countries": searchdash::regions::countries() })));
    };
    let country = searchdash::regions::country(code)
        .ok_or_else(|| DashboardError::NotFound(format!("country {code}")))?;
    Ok(Json(json!({
        "country": country,
        "options": searchdash::regions::region_options(country.code),
    })))
}
