use crate::domain::Point;

/// Format a coordinate with exactly two decimals
///
/// Rounds the exact binary value to the nearest hundredth, ties to even, so
/// `-2.005` (stored as -2.00499999...) becomes `-2.00`. Negative zero is
/// written as `0.00`.
pub fn format_coordinate(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// Canonical literal for a point field, e.g. `centroid: { x: 1.00, y: 2.50 }`
pub fn point_literal(key: &str, point: Point) -> String {
    format!(
        "{}: {{ x: {}, y: {} }}",
        key,
        format_coordinate(point.x),
        format_coordinate(point.y)
    )
}

/// Escape an outline payload so it can sit between `quote` characters
pub fn quote_payload(payload: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(payload.len());
    for c in payload.chars() {
        if c == '\\' || c == quote {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
