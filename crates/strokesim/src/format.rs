/// Format a point estimate with its interval, e.g. `8.35 (8.02, 8.68)`
pub fn format_estimate_interval(estimate: f64, interval: (f64, f64), deci: usize) -> String {
    format!(
        "{:.deci$} ({:.deci$}, {:.deci$})",
        estimate, interval.0, interval.1
    )
}

/// Format a confidence level from a significance level, e.g. `95%`
pub fn format_confidence_level(alpha: f64) -> String {
    format!("{:.0}%", (1.0 - alpha) * 100.0)
}
