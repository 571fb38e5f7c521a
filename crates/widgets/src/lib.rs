pub mod chart;
pub mod controls;
pub mod history;
pub mod metrics;
pub mod status;

pub use chart::TemperatureChart;
pub use controls::{Controls, ControlsWidget};
pub use history::HistoryTable;
pub use metrics::MetricsWidget;
pub use status::StatusBanner;

/// Shown in place of any value that is absent.
pub const PLACEHOLDER: &str = "—";

/// Two-decimal reading, or [`PLACEHOLDER`] when absent.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Signed two-decimal change, e.g. `"+1.25"` / `"-4.50"`.
pub fn format_delta(delta: f64) -> String {
    format!("{delta:+.2}")
}

/// `"min / max"`, or [`PLACEHOLDER`] when the window holds no temperature.
pub fn format_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{lo:.2} / {hi:.2}"),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_formats_two_decimals() {
        assert_eq!(format_value(Some(22.0)), "22.00");
        assert_eq!(format_value(None), PLACEHOLDER);
        assert_eq!(format_value(Some(f64::NAN)), PLACEHOLDER);
    }

    #[test]
    fn delta_is_signed() {
        assert_eq!(format_delta(-4.5), "-4.50");
        assert_eq!(format_delta(0.0), "+0.00");
        assert_eq!(format_delta(1.254), "+1.25");
    }

    #[test]
    fn range_needs_both_ends() {
        assert_eq!(format_range(Some(19.0), Some(23.5)), "19.00 / 23.50");
        assert_eq!(format_range(None, None), PLACEHOLDER);
    }
}
