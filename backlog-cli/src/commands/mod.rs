pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod enrich;
pub(crate) mod ignore;
pub(crate) mod import;
pub(crate) mod journal;
pub(crate) mod library;
pub(crate) mod search;
pub(crate) mod stats;

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Format an optional hour figure for a table column.
pub(crate) fn format_hours(hours: Option<f64>) -> String {
    match hours {
        Some(h) => format!("{:.1}h", h),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_str("Hades", 10), "Hades");
        assert_eq!(truncate_str("Ōkami HD Remastered", 8), "Ōkami...");
        assert_eq!(truncate_str("Celeste", 2), "Ce");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_hours(Some(2.1)), "2.1h");
        assert_eq!(format_hours(Some(40.0)), "40.0h");
        assert_eq!(format_hours(None), "-");
    }
}
