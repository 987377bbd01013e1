//! Time-unit conversion for playtime and completion estimates.

/// Convert minutes to hours, rounded to one decimal place.
///
/// ```
/// use backlog_catalog::playtime::minutes_to_hours;
///
/// assert_eq!(minutes_to_hours(125), 2.1);
/// assert_eq!(minutes_to_hours(0), 0.0);
/// ```
pub fn minutes_to_hours(minutes: u64) -> f64 {
    round_tenths(minutes as f64 / 60.0)
}

/// Convert seconds to hours, rounded to one decimal place.
pub fn seconds_to_hours(seconds: u64) -> f64 {
    round_tenths(seconds as f64 / 3600.0)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
