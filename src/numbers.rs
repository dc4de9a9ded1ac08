/// Percent change from `previous` to `current`.
///
/// A zero `previous` yields 100 when `current` is non-zero and 0 otherwise.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current != 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
