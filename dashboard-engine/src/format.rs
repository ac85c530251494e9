//! FILENAME: dashboard-engine/src/format.rs
//! PURPOSE: Display-string formatting for KPI tiles.
//! CONTEXT: The resolver hands the presentation layer ready-made tile text
//! so every surface renders amounts the same way.

/// Marker shown when a ratio is undefined for the selected year.
pub const NOT_AVAILABLE: &str = "n/a";

/// Formats a monetary amount, e.g. `1234.56 €`.
pub fn format_currency(value: f64) -> String {
    format!("{:.2} €", value)
}

/// Formats a ratio as a percentage, e.g. `0.2` becomes `20.00 %`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2} %", ratio * 100.0)
}

pub fn format_count(count: u64) -> String {
    count.to_string()
}
