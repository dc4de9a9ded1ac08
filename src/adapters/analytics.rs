//! Traffic-analytics adapter: account summaries and the daily sessions report.

use serde::Deserialize;
use serde_json::json;

use crate::dates::{compact_to_iso, DateRange};
use crate::error::{DashboardError, Result};
use crate::http::{collect_pages, get_json, post_json, Paged};
use crate::models::{Property, SessionPoint};
use crate::DashboardClient;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AccountSummariesPage {
    account_summaries: Vec<AccountSummary>,
    next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AccountSummary {
    account: String,
    display_name: String,
    property_summaries: Vec<PropertySummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PropertySummary {
    property: String,
    display_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RunReportResponse {
    rows: Vec<ReportRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ReportRow {
    dimension_values: Vec<ReportValue>,
    metric_values: Vec<ReportValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReportValue {
    value: String,
}

// ---------------------------------------------------------------------------
// AnalyticsApi
// ---------------------------------------------------------------------------

/// Query interface for the traffic-analytics admin and data APIs.
pub struct AnalyticsApi<'a> {
    client: &'a DashboardClient,
    token: &'a str,
}

impl<'a> AnalyticsApi<'a> {
    pub fn new(client: &'a DashboardClient, token: &'a str) -> Self {
        Self { client, token }
    }

    /// List every property the user can see, flattened across accounts.
    pub async fn list_properties(&self) -> Result<Paged<Property>> {
        let url = format!(
            "{}/v1beta/accountSummaries",
            self.client.endpoints().analytics_admin
        );

        let client = self.client;
        let token = self.token;

        collect_pages(move |page_token| {
            let url = url.clone();
            async move {
                let mut query = vec![("pageSize", "200".to_string())];
                if let Some(t) = page_token {
                    query.push(("pageToken", t));
                }
                let page: AccountSummariesPage =
                    get_json(client.http(), &url, Some(token), &query).await?;

                let properties: Vec<Property> = page
                    .account_summaries
                    .into_iter()
                    .flat_map(|acc| {
                        let account = acc.account;
                        let account_name = acc.display_name;
                        acc.property_summaries.into_iter().map(move |p| Property {
                            id: p.property,
                            display_name: p.display_name,
                            account: account.clone(),
                            account_name: account_name.clone(),
                        })
                    })
                    .collect();
                Ok::<_, DashboardError>((properties, page.next_page_token))
            }
        })
        .await
    }

    /// Daily sessions for a property over an inclusive range.
    ///
    /// `property_id` may be given as `123` or `properties/123`.
    pub async fn daily_sessions(
        &self,
        property_id: &str,
        range: &DateRange,
    ) -> Result<Vec<SessionPoint>> {
        let property = property_resource(property_id)?;
        let url = format!(
            "{}/v1beta/{}:runReport",
            self.client.endpoints().analytics_data,
            property
        );
        let body = json!({
            "dateRanges": [{ "startDate": range.start_date, "endDate": range.end_date }],
            "dimensions": [{ "name": "date" }],
            "metrics": [{ "name": "sessions" }],
            "orderBys": [{ "dimension": { "dimensionName": "date" } }],
            "keepEmptyRows": true,
        });

        let report: RunReportResponse =
            post_json(self.client.http(), &url, Some(self.token), &[], &body).await?;

        Ok(report
            .rows
            .into_iter()
            .map(|row| SessionPoint {
                date: row
                    .dimension_values
                    .first()
                    .map(|d| compact_to_iso(&d.value))
                    .unwrap_or_default(),
                sessions: row
                    .metric_values
                    .first()
                    .and_then(|m| m.value.trim().parse::<f64>().ok())
                    .map(|v| v.max(0.0).round() as u64)
                    .unwrap_or(0),
            })
            .collect())
    }
}

/// Normalize a property id to its `properties/<id>` resource name.
pub fn property_resource(property_id: &str) -> Result<String> {
    let id = property_id.trim();
    let bare = id.strip_prefix("properties/").unwrap_or(id);
    if bare.is_empty() {
        return Err(DashboardError::missing(["propertyId"]));
    }
    Ok(format!("properties/{bare}"))
}
