//! Locale-aware numeric parsing for export metric fields.

/// Parse a metric value written with the export's pt-BR convention: period
/// as thousands separator, comma as decimal separator ("1.234,56" is
/// 1234.56). A value that fails to parse yields 0, never an error.
pub fn parse_metric(raw: &str) -> f64 {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    normalized.parse::<f64>().unwrap_or(0.0)
}
