use searchdash::DashboardClient;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Stateless client for every external API. Per-user credentials are
    /// passed on each call, never stored here.
    pub client: DashboardClient,
}
