//! searchdash: backend for a search analytics dashboard.
//!
//! Proxies the signed-in user's bearer credential to the external reporting
//! APIs (traffic analytics, search console, business profile), a rank-check
//! search lookup service and a per-user spreadsheet, and reshapes the JSON
//! they return into small records ready to chart.
//!
//! # Quick start
//!
//! ```no_run
//! use searchdash::dates::DateRange;
//! use searchdash::DashboardClient;
//!
//! # async fn example(token: &str) -> searchdash::Result<()> {
//! let client = DashboardClient::builder().build()?;
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-28")?;
//! let series = client
//!     .combined_series(token, "properties/123", "https://example.com/", &range)
//!     .await?;
//! let summary = searchdash::series::summarize(&series);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod csv;
pub mod dates;
pub mod error;
pub mod http;
pub mod models;
pub mod numbers;
pub mod preferences;
pub mod rank;
pub mod regions;
pub mod series;
pub mod tracker;
pub mod vault;

pub use config::{Endpoints, RankProviderKind, RankSettings};
pub use error::{DashboardError, Result};
pub use http::Paged;
pub use preferences::{PreferenceStore, UserPreferences};

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::dates::DateRange;
use crate::models::MergedRow;

// ---------------------------------------------------------------------------
// DashboardClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DashboardClient`].
///
/// Use [`DashboardClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DashboardClientBuilder::build).
pub struct DashboardClientBuilder {
    endpoints: Endpoints,
    timeout: Option<Duration>,
    rank: RankSettings,
    user_agent: String,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: None,
            rank: RankSettings::default(),
            user_agent: format!("searchdash/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DashboardClientBuilder {
    /// Override the base URLs of the external services.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set a request timeout for outbound calls.
    ///
    /// Unset by default, leaving the transport's own behaviour in place.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configure the rank-check provider flag and its credentials.
    pub fn rank_settings(mut self, rank: RankSettings) -> Self {
        self.rank = rank;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client. No network traffic happens here.
    pub fn build(self) -> Result<DashboardClient> {
        let mut builder = Client::builder().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(DashboardClient {
            http: builder.build()?,
            endpoints: self.endpoints,
            rank: self.rank,
        })
    }
}

// ---------------------------------------------------------------------------
// DashboardClient
// ---------------------------------------------------------------------------

/// The main entry point: one shared HTTP client plus endpoint configuration.
///
/// Holds no per-user state. Every adapter accessor takes the caller's bearer
/// credential and returns a lightweight borrowing wrapper.
pub struct DashboardClient {
    http: Client,
    endpoints: Endpoints,
    rank: RankSettings,
}

impl DashboardClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    // -- Adapter accessors -------------------------------------------------

    /// Traffic-analytics properties and reports.
    pub fn analytics<'a>(&'a self, token: &'a str) -> adapters::AnalyticsApi<'a> {
        adapters::AnalyticsApi::new(self, token)
    }

    /// Search-console sites and performance queries.
    pub fn search_console<'a>(&'a self, token: &'a str) -> adapters::SearchConsoleApi<'a> {
        adapters::SearchConsoleApi::new(self, token)
    }

    /// Business-profile accounts, locations and daily metrics.
    pub fn business_profile<'a>(&'a self, token: &'a str) -> adapters::BusinessProfileApi<'a> {
        adapters::BusinessProfileApi::new(self, token)
    }

    /// Spreadsheet lookup, read and append.
    pub fn sheets<'a>(&'a self, token: &'a str) -> adapters::SheetsApi<'a> {
        adapters::SheetsApi::new(self, token)
    }

    /// Identity of the signed-in user.
    pub fn identity<'a>(&'a self, token: &'a str) -> adapters::IdentityApi<'a> {
        adapters::IdentityApi::new(self, token)
    }

    /// Settings vault stored in the user's spreadsheet.
    pub fn vault<'a>(&'a self, token: &'a str) -> vault::Vault<'a> {
        vault::Vault::new(self.sheets(token))
    }

    /// Tracker runs appended to the user's spreadsheet.
    pub fn tracker<'a>(&'a self, token: &'a str) -> tracker::Tracker<'a> {
        tracker::Tracker::new(self, token)
    }

    /// Rank-check lookups through the configured provider.
    pub fn rank_check(&self) -> rank::RankChecker<'_> {
        rank::RankChecker::new(self)
    }

    // -- Composite operations ----------------------------------------------

    /// Fetch daily sessions and search performance concurrently and merge them.
    ///
    /// Either call failing fails the whole request.
    pub async fn combined_series(
        &self,
        token: &str,
        property_id: &str,
        site_url: &str,
        range: &DateRange,
    ) -> Result<Vec<MergedRow>> {
        let analytics = self.analytics(token);
        let search_console = self.search_console(token);
        let (sessions, search) = futures::future::try_join(
            analytics.daily_sessions(property_id, range),
            search_console.daily_performance(site_url, range),
        )
        .await?;
        Ok(series::reconcile(&sessions, &search))
    }

    // -- Accessors ---------------------------------------------------------

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn rank_settings(&self) -> &RankSettings {
        &self.rank
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DashboardClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DashboardClient(rank_provider={})",
            self.rank
                .provider
                .map(|p| p.as_str())
                .unwrap_or("none")
        )
    }
}
