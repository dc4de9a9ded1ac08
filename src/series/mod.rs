//! Time-series shaping: reconciliation of the two daily sources and the
//! week-over-week insight built on top of it.

pub mod insight;
pub mod reconcile;

pub use insight::{summarize, Insight, WindowStats};
pub use reconcile::{merge_series, moving_average, reconcile, with_moving_average};
