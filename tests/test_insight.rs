//! Week-over-week summary tests.

mod common;

use common::{flat_rows, row};
use searchdash::numbers::{pct_change, round_to};
use searchdash::series::insight::{compute, windows};
use searchdash::series::summarize;

// ---------------------------------------------------------------------------
// pct_change
// ---------------------------------------------------------------------------

#[test]
fn pct_change_documented_examples() {
    assert_eq!(pct_change(0.0, 0.0), 0.0);
    assert_eq!(pct_change(5.0, 0.0), 100.0);
    assert_eq!(pct_change(50.0, 100.0), -50.0);
}

#[test]
fn pct_change_increase() {
    assert_eq!(round_to(pct_change(150.0, 100.0), 1), 50.0);
}

// ---------------------------------------------------------------------------
// windows / compute
// ---------------------------------------------------------------------------

#[test]
fn windows_split_last_fourteen_days() {
    let rows = flat_rows(20, 1, 1, 1.0);
    let (current, prior) = windows(&rows);
    assert_eq!(current.len(), 7);
    assert_eq!(prior.len(), 7);
    assert_eq!(current[0].date, "2024-01-14");
    assert_eq!(prior[0].date, "2024-01-07");
}

#[test]
fn short_series_has_short_windows() {
    let rows = flat_rows(10, 1, 1, 1.0);
    let (current, prior) = windows(&rows);
    assert_eq!(current.len(), 7);
    assert_eq!(prior.len(), 3);

    let rows = flat_rows(4, 1, 1, 1.0);
    let (current, prior) = windows(&rows);
    assert_eq!(current.len(), 4);
    assert!(prior.is_empty());
}

#[test]
fn compute_aggregates_both_windows() {
    let mut rows = flat_rows(7, 10, 2, 1.0);
    rows.extend((8..=14).map(|d| row(&format!("2024-01-{d:02}"), 20, 1, 3.0)));
    let insight = compute(&rows).unwrap();

    assert_eq!(insight.current.sessions, 140);
    assert_eq!(insight.prior.sessions, 70);
    assert_eq!(insight.current.clicks, 7);
    assert_eq!(insight.prior.clicks, 14);
    assert!((insight.sessions_change - 100.0).abs() < 1e-9);
    assert!((insight.clicks_change + 50.0).abs() < 1e-9);
    assert!((insight.current.avg_ctr - 3.0).abs() < 1e-9);
    assert!((insight.ctr_change - 200.0).abs() < 1e-9);
}

#[test]
fn compute_of_empty_is_none() {
    assert!(compute(&[]).is_none());
}

// ---------------------------------------------------------------------------
// summarize
// ---------------------------------------------------------------------------

#[test]
fn summary_of_empty_series_is_empty() {
    assert_eq!(summarize(&[]), "");
}

#[test]
fn summary_reports_totals_and_changes() {
    let mut rows = flat_rows(7, 10, 2, 1.0);
    rows.extend((8..=14).map(|d| row(&format!("2024-01-{d:02}"), 20, 1, 3.0)));
    let summary = summarize(&rows);

    assert!(summary.contains("last 7 days"), "{summary}");
    assert!(summary.contains("sessions totaled 140 (+100.0%"), "{summary}");
    assert!(summary.contains("clicks totaled 7 (-50.0%)"), "{summary}");
    assert!(summary.contains("Average CTR was 3.00%"), "{summary}");
}

#[test]
fn summary_without_prior_window_counts_as_growth() {
    let summary = summarize(&flat_rows(3, 5, 1, 2.0));
    assert!(summary.contains("last 3 days"), "{summary}");
    assert!(summary.contains("sessions totaled 15 (+100.0%"), "{summary}");
}

#[test]
fn summary_of_flat_series_shows_no_change() {
    let summary = summarize(&flat_rows(14, 5, 1, 2.0));
    assert!(summary.contains("(0.0% vs the prior period)"), "{summary}");
}
