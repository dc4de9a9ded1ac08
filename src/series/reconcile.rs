//! Merge of the traffic-analytics and search-console daily series.
//!
//! Both series are keyed by ISO date string. The merged output holds one row
//! per date in the union of both inputs, sorted ascending by date string.

use std::collections::BTreeMap;

use crate::models::{MergedRow, SearchPoint, SessionPoint};
use crate::numbers::round_to;

/// Points included in the trailing moving average (current + 6 before it).
pub const MOVING_AVERAGE_WINDOW: usize = 7;

/// Union-merge the two series on date.
///
/// A date present in only one input gets zeros for the other source's
/// metrics. If a source repeats a date, its last value wins.
pub fn merge_series(sessions: &[SessionPoint], search: &[SearchPoint]) -> Vec<MergedRow> {
    let mut by_date: BTreeMap<&str, MergedRow> = BTreeMap::new();

    for point in sessions {
        let row = by_date.entry(point.date.as_str()).or_insert_with(|| MergedRow {
            date: point.date.clone(),
            ..Default::default()
        });
        row.sessions = point.sessions;
    }

    for point in search {
        let row = by_date.entry(point.date.as_str()).or_insert_with(|| MergedRow {
            date: point.date.clone(),
            ..Default::default()
        });
        row.clicks = point.clicks;
        row.ctr = round_to(point.ctr_fraction * 100.0, 2);
    }

    by_date.into_values().collect()
}

/// Trailing prefix-window mean, rounded to the nearest integer.
///
/// The window shrinks at the start of the sequence and never looks before
/// index 0, so `result[0] == values[0]`.
pub fn moving_average(values: &[u64], window: usize) -> Vec<u64> {
    let window = window.max(1);
    let mut sum: u64 = 0;
    let mut out = Vec::with_capacity(values.len());

    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let len = (i + 1).min(window);
        out.push((sum as f64 / len as f64).round() as u64);
    }
    out
}

/// Attach the 7-point sessions moving average to each row.
pub fn with_moving_average(mut rows: Vec<MergedRow>) -> Vec<MergedRow> {
    let sessions: Vec<u64> = rows.iter().map(|r| r.sessions).collect();
    let averages = moving_average(&sessions, MOVING_AVERAGE_WINDOW);
    for (row, avg) in rows.iter_mut().zip(averages) {
        row.moving_average = Some(avg);
    }
    rows
}

/// Merge both series and attach the moving average.
pub fn reconcile(sessions: &[SessionPoint], search: &[SearchPoint]) -> Vec<MergedRow> {
    with_moving_average(merge_series(sessions, search))
}
