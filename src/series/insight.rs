//! Week-over-week summary of a merged series.

use serde::Serialize;

use crate::models::MergedRow;
use crate::numbers::{mean, pct_change, round_to};

/// Length of the current and prior windows.
pub const WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub days: usize,
    pub sessions: u64,
    pub clicks: u64,
    /// Mean of the rows' CTR percentages.
    pub avg_ctr: f64,
}

impl WindowStats {
    fn of(rows: &[MergedRow]) -> Self {
        let ctrs: Vec<f64> = rows.iter().map(|r| r.ctr).collect();
        Self {
            days: rows.len(),
            sessions: rows.iter().map(|r| r.sessions).sum(),
            clicks: rows.iter().map(|r| r.clicks).sum(),
            avg_ctr: mean(&ctrs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub current: WindowStats,
    pub prior: WindowStats,
    pub sessions_change: f64,
    pub clicks_change: f64,
    pub ctr_change: f64,
}

/// Split off the trailing window and the window before it.
///
/// Short inputs give a short current window and a short (possibly empty)
/// prior window; the two never share rows.
pub fn windows(rows: &[MergedRow]) -> (&[MergedRow], &[MergedRow]) {
    let cur_start = rows.len().saturating_sub(WINDOW);
    let prior_start = cur_start.saturating_sub(WINDOW);
    (&rows[cur_start..], &rows[prior_start..cur_start])
}

/// Compute window aggregates and their percent changes. `None` when empty.
pub fn compute(rows: &[MergedRow]) -> Option<Insight> {
    if rows.is_empty() {
        return None;
    }
    let (current, prior) = windows(rows);
    let current = WindowStats::of(current);
    let prior = WindowStats::of(prior);

    Some(Insight {
        current,
        prior,
        sessions_change: pct_change(current.sessions as f64, prior.sessions as f64),
        clicks_change: pct_change(current.clicks as f64, prior.clicks as f64),
        ctr_change: pct_change(current.avg_ctr, prior.avg_ctr),
    })
}

fn signed(pct: f64) -> String {
    let pct = round_to(pct, 1);
    if pct > 0.0 {
        format!("+{pct:.1}%")
    } else if pct < 0.0 {
        format!("{pct:.1}%")
    } else {
        "0.0%".to_string()
    }
}

/// Render the two-sentence summary; empty string for empty input.
pub fn summarize(rows: &[MergedRow]) -> String {
    let Some(insight) = compute(rows) else {
        return String::new();
    };
    let cur = insight.current;

    format!(
        "Over the last {} days, sessions totaled {} ({} vs the prior period) and clicks totaled {} ({}). \
         Average CTR was {:.2}% ({} change).",
        cur.days,
        cur.sessions,
        signed(insight.sessions_change),
        cur.clicks,
        signed(insight.clicks_change),
        round_to(cur.avg_ctr, 2),
        signed(insight.ctr_change),
    )
}
