//! Display helpers shared by the dashboard and the report commands.
//!
//! Every function here is pure. Numeric inputs must be finite and
//! non-negative; debug builds assert this, release builds format whatever
//! they are given without clamping.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

pub const TOOLTIP_LABEL: &str = "Tokens";

/// Compact token count: `1.5K`, `2.0M`, or the plain integer below 1000.
pub fn format_tokens(n: f64) -> String {
    debug_assert!(n.is_finite() && n >= 0.0, "token count must be finite and non-negative: {n}");

    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    }
}

/// Per-record cost, always four decimals.
pub fn format_cost(n: f64) -> String {
    debug_assert!(n.is_finite() && n >= 0.0, "cost must be finite and non-negative: {n}");
    format!("${:.4}", n)
}

/// Aggregate cost as shown on the summary card.
pub fn format_total_cost(n: f64) -> String {
    debug_assert!(n.is_finite() && n >= 0.0, "cost must be finite and non-negative: {n}");
    format!("${:.2}", n)
}

/// Value/label pair for a chart data point. A missing value reads as zero.
pub fn tooltip_formatter(value: Option<f64>) -> (String, &'static str) {
    (format_tokens(value.unwrap_or(0.0)), TOOLTIP_LABEL)
}

/// `2024-01-05` -> `Jan 5`. Unparseable keys are returned unchanged.
pub fn format_day_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(day) => day.format("%b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Activity table timestamp, e.g. `Mar 5, 02:22 PM`.
///
/// Offset-carrying timestamps are shown in the viewer's local time; naive
/// ones are taken as already local.
pub fn format_timestamp(created_at: &str) -> String {
    const DISPLAY: &str = "%b %-d, %I:%M %p";

    if let Ok(ts) = DateTime::parse_from_rfc3339(created_at) {
        return ts.with_timezone(&Local).format(DISPLAY).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format(DISPLAY).to_string();
    }
    created_at.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Claude,
    Gpt,
    Other,
}

impl ModelFamily {
    pub fn classify(model: &str) -> Self {
        if model.contains("claude") {
            Self::Claude
        } else if model.contains("gpt") {
            Self::Gpt
        } else {
            Self::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens_thresholds() {
        assert_eq!(format_tokens(0.0), "0");
        assert_eq!(format_tokens(999.0), "999");
        assert_eq!(format_tokens(1000.0), "1.0K");
        assert_eq!(format_tokens(1500.0), "1.5K");
        assert_eq!(format_tokens(1_000_000.0), "1.0M");
        assert_eq!(format_tokens(2_450_000.0), "2.5M");
    }

    #[test]
    fn test_format_tokens_fractional_average() {
        assert_eq!(format_tokens(175.0), "175");
        assert_eq!(format_tokens(12.4), "12");
    }

    #[test]
    fn test_tooltip_missing_value_defaults_to_zero() {
        let (formatted, label) = tooltip_formatter(None);
        assert_eq!(formatted, "0");
        assert_eq!(label, "Tokens");
    }

    #[test]
    fn test_tooltip_matches_format_tokens() {
        for v in [0.0, 50.0, 999.0, 1000.0, 1500.0, 1_000_000.0] {
            let (from_tooltip, label) = tooltip_formatter(Some(v));
            assert_eq!(from_tooltip, format_tokens(v));
            assert_eq!(label, TOOLTIP_LABEL);
        }
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(0.0), "$0.0000");
        assert_eq!(format_cost(1.23456), "$1.2346");
        assert_eq!(format_cost(0.5), "$0.5000");
    }

    #[test]
    fn test_format_total_cost() {
        assert_eq!(format_total_cost(0.0), "$0.00");
        assert_eq!(format_total_cost(3.14159), "$3.14");
    }

    #[test]
    fn test_format_day_label() {
        assert_eq!(format_day_label("2024-01-05"), "Jan 5");
        assert_eq!(format_day_label("2024-12-31"), "Dec 31");
        assert_eq!(format_day_label("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_format_timestamp_naive_and_fallback() {
        assert_eq!(format_timestamp("2024-03-05T14:22:10"), "Mar 5, 02:22 PM");
        assert_eq!(format_timestamp("2024-03-05T09:05:00.500"), "Mar 5, 09:05 AM");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_model_family() {
        assert_eq!(ModelFamily::classify("claude-3-opus"), ModelFamily::Claude);
        assert_eq!(ModelFamily::classify("gpt-4o-mini"), ModelFamily::Gpt);
        assert_eq!(ModelFamily::classify("gemini-1.5-pro"), ModelFamily::Other);
    }
}
