//! Business-profile adapter: accounts, locations and daily performance metrics.

use chrono::Datelike;
use serde::Deserialize;

use crate::dates::{parse_day, DateRange};
use crate::error::{DashboardError, Result};
use crate::http::{collect_pages, get_json, Paged};
use crate::models::{BusinessAccount, BusinessLocation, LocationMetricPoint};
use crate::DashboardClient;

/// Metrics fetched when the caller does not name any.
pub const DEFAULT_METRICS: &[&str] = &[
    "WEBSITE_CLICKS",
    "CALL_CLICKS",
    "BUSINESS_DIRECTION_REQUESTS",
    "BUSINESS_IMPRESSIONS_MOBILE_SEARCH",
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AccountsPage {
    accounts: Vec<AccountEntry>,
    next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AccountEntry {
    name: String,
    account_name: String,
    #[serde(rename = "type")]
    type_field: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LocationsPage {
    locations: Vec<LocationEntry>,
    next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LocationEntry {
    name: String,
    title: String,
    storefront_address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Address {
    locality: Option<String>,
    administrative_area: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MultiMetricsResponse {
    multi_daily_metric_time_series: Vec<MultiSeries>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MultiSeries {
    daily_metric_time_series: Vec<MetricSeries>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MetricSeries {
    daily_metric: String,
    time_series: TimeSeries,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TimeSeries {
    dated_values: Vec<DatedValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatedValue {
    date: ApiDate,
    /// Int64 values arrive as strings and are omitted when zero.
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiDate {
    year: i32,
    month: u32,
    day: u32,
}

// ---------------------------------------------------------------------------
// BusinessProfileApi
// ---------------------------------------------------------------------------

/// Query interface for the business-profile APIs.
pub struct BusinessProfileApi<'a> {
    client: &'a DashboardClient,
    token: &'a str,
}

impl<'a> BusinessProfileApi<'a> {
    pub fn new(client: &'a DashboardClient, token: &'a str) -> Self {
        Self { client, token }
    }

    /// List the business accounts the user manages.
    pub async fn list_accounts(&self) -> Result<Paged<BusinessAccount>> {
        let url = format!("{}/v1/accounts", self.client.endpoints().business_accounts);
        let client = self.client;
        let token = self.token;

        collect_pages(move |page_token| {
            let url = url.clone();
            async move {
                let mut query = vec![("pageSize", "20".to_string())];
                if let Some(t) = page_token {
                    query.push(("pageToken", t));
                }
                let page: AccountsPage = get_json(client.http(), &url, Some(token), &query).await?;
                let accounts: Vec<BusinessAccount> = page
                    .accounts
                    .into_iter()
                    .map(|a| BusinessAccount {
                        name: a.name,
                        account_name: a.account_name,
                        type_field: a.type_field,
                    })
                    .collect();
                Ok::<_, DashboardError>((accounts, page.next_page_token))
            }
        })
        .await
    }

    /// List the locations of an account (`accounts/<id>`).
    pub async fn list_locations(&self, account: &str) -> Result<Paged<BusinessLocation>> {
        let account = account.trim();
        if account.is_empty() {
            return Err(DashboardError::missing(["account"]));
        }
        let url = format!(
            "{}/v1/{}/locations",
            self.client.endpoints().business_info,
            account
        );
        let client = self.client;
        let token = self.token;

        collect_pages(move |page_token| {
            let url = url.clone();
            async move {
                let mut query = vec![
                    ("readMask", "name,title,storefrontAddress".to_string()),
                    ("pageSize", "100".to_string()),
                ];
                if let Some(t) = page_token {
                    query.push(("pageToken", t));
                }
                let page: LocationsPage = get_json(client.http(), &url, Some(token), &query).await?;
                let locations: Vec<BusinessLocation> = page
                    .locations
                    .into_iter()
                    .map(|l| {
                        let address = l.storefront_address.unwrap_or_default();
                        BusinessLocation {
                            name: l.name,
                            title: l.title,
                            locality: address.locality,
                            region: address.administrative_area,
                        }
                    })
                    .collect();
                Ok::<_, DashboardError>((locations, page.next_page_token))
            }
        })
        .await
    }

    /// Daily values of the given metrics for a location (`locations/<id>`).
    ///
    /// An empty `metrics` slice requests [`DEFAULT_METRICS`].
    pub async fn daily_metrics(
        &self,
        location: &str,
        range: &DateRange,
        metrics: &[&str],
    ) -> Result<Vec<LocationMetricPoint>> {
        let location = location.trim();
        if location.is_empty() {
            return Err(DashboardError::missing(["location"]));
        }
        let start = parse_day(&range.start_date)?;
        let end = parse_day(&range.end_date)?;
        let metrics = if metrics.is_empty() {
            DEFAULT_METRICS
        } else {
            metrics
        };

        let url = format!(
            "{}/v1/{}:fetchMultiDailyMetricsTimeSeries",
            self.client.endpoints().business_performance,
            location
        );
        let mut query: Vec<(&str, String)> = metrics
            .iter()
            .map(|m| ("dailyMetrics", m.to_string()))
            .collect();
        query.extend([
            ("dailyRange.start_date.year", start.year().to_string()),
            ("dailyRange.start_date.month", start.month().to_string()),
            ("dailyRange.start_date.day", start.day().to_string()),
            ("dailyRange.end_date.year", end.year().to_string()),
            ("dailyRange.end_date.month", end.month().to_string()),
            ("dailyRange.end_date.day", end.day().to_string()),
        ]);

        let resp: MultiMetricsResponse =
            get_json(self.client.http(), &url, Some(self.token), &query).await?;

        let mut points: Vec<LocationMetricPoint> = resp
            .multi_daily_metric_time_series
            .into_iter()
            .flat_map(|m| m.daily_metric_time_series)
            .flat_map(|series| {
                let metric = series.daily_metric;
                series
                    .time_series
                    .dated_values
                    .into_iter()
                    .map(move |dv| LocationMetricPoint {
                        date: format!(
                            "{:04}-{:02}-{:02}",
                            dv.date.year, dv.date.month, dv.date.day
                        ),
                        metric: metric.clone(),
                        value: dv
                            .value
                            .and_then(|v| v.trim().parse().ok())
                            .unwrap_or(0),
                    })
            })
            .collect();
        points.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.metric.cmp(&b.metric)));
        Ok(points)
    }
}
