//! Adapters for the external reporting APIs.
//!
//! Each adapter is a lightweight wrapper borrowing the [`DashboardClient`](crate::DashboardClient)
//! and the caller's bearer credential. Calls are never retried or cached; any
//! non-2xx response surfaces as [`DashboardError::Upstream`](crate::DashboardError::Upstream).

pub mod analytics;
pub mod business_profile;
pub mod identity;
pub mod search_console;
pub mod sheets;

pub use analytics::AnalyticsApi;
pub use business_profile::BusinessProfileApi;
pub use identity::IdentityApi;
pub use search_console::{QueryPageFilter, SearchConsoleApi};
pub use sheets::SheetsApi;
