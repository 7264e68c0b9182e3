//! Quantity parsing and formatting
//!
//! Handles the leading quantity of an ingredient line: integers ("2"),
//! decimals ("1.5"), fractions ("1/2") and mixed numbers ("1 1/2").

/// Values this close to an integer are rendered as that integer
pub const INTEGER_TOLERANCE: f64 = 0.05;

/// Maximum distance between a fractional part and a common fraction
pub const FRACTION_TOLERANCE: f64 = 0.1;

/// Common culinary fractions, in preference order for ties
pub const COMMON_FRACTIONS: &[(f64, &str)] = &[
    (0.25, "1/4"),
    (0.33, "1/3"),
    (0.5, "1/2"),
    (0.66, "2/3"),
    (0.75, "3/4"),
];

/// A quantity expression found at the start of a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityToken<'a> {
    /// Whole part, possibly with a decimal tail ("2", "1.5")
    pub whole: Option<&'a str>,
    /// Fraction part ("1/2")
    pub fraction: Option<&'a str>,
    /// Byte length of the token in the source text
    pub len: usize,
}

impl QuantityToken<'_> {
    /// Text form accepted by [`parse_quantity`]
    ///
    /// Mixed numbers written with a `.` separator ("1.1/2") are rewritten
    /// with a single space.
    pub fn canonical(&self) -> String {
        match (self.whole, self.fraction) {
            (Some(whole), Some(fraction)) => format!("{} {}", whole, fraction),
            (Some(whole), None) => whole.to_string(),
            (None, Some(fraction)) => fraction.to_string(),
            (None, None) => String::new(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        parse_quantity(&self.canonical())
    }
}

fn digits_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// End of an `N/M` fraction starting at `start`
fn fraction_end(bytes: &[u8], start: usize) -> Option<usize> {
    let numerator_end = digits_end(bytes, start);
    if numerator_end == start || bytes.get(numerator_end) != Some(&b'/') {
        return None;
    }
    let denominator_end = digits_end(bytes, numerator_end + 1);
    if denominator_end == numerator_end + 1 {
        return None;
    }
    Some(denominator_end)
}

/// End of a mixed-number separator: spaces, or `.` with optional spaces around it
fn separator_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while bytes.get(i) == Some(&b' ') {
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i) == Some(&b' ') {
            i += 1;
        }
    }
    (i > start).then_some(i)
}

/// Find the quantity expression at the very start of `text`
///
/// The grammar is, in order of preference:
/// - fraction: `1/2`
/// - mixed number: `1 1/2`, `1.1/2`, `1 . 1/2`
/// - decimal: `1.5`
/// - integer: `2`
///
/// A separator is only consumed when a fraction follows it, so whitespace
/// after the quantity stays with the rest of the line.
pub fn leading_quantity(text: &str) -> Option<QuantityToken<'_>> {
    let bytes = text.as_bytes();

    if let Some(end) = fraction_end(bytes, 0) {
        return Some(QuantityToken {
            whole: None,
            fraction: Some(&text[..end]),
            len: end,
        });
    }

    let integer_end = digits_end(bytes, 0);
    if integer_end == 0 {
        return None;
    }

    if let Some(fraction_start) = separator_end(bytes, integer_end) {
        if let Some(end) = fraction_end(bytes, fraction_start) {
            return Some(QuantityToken {
                whole: Some(&text[..integer_end]),
                fraction: Some(&text[fraction_start..end]),
                len: end,
            });
        }
    }

    if bytes.get(integer_end) == Some(&b'.') {
        let decimal_end = digits_end(bytes, integer_end + 1);
        if decimal_end > integer_end + 1 {
            return Some(QuantityToken {
                whole: Some(&text[..decimal_end]),
                fraction: None,
                len: decimal_end,
            });
        }
    }

    Some(QuantityToken {
        whole: Some(&text[..integer_end]),
        fraction: None,
        len: integer_end,
    })
}

/// Parse a fraction like "1/2"
///
/// Requires exactly two numeric parts and a non-zero denominator.
pub fn parse_fraction(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 2 {
        return None;
    }

    let numerator: f64 = parts[0].trim().parse().ok()?;
    let denominator: f64 = parts[1].trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }

    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Parse a quantity string into a number
///
/// Examples:
/// - "2" -> 2.0
/// - "1.5" -> 1.5
/// - "1/2" -> 0.5
/// - "1 1/2" -> 1.5
/// - "" or "1/0" -> None
pub fn parse_quantity(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parts: Vec<&str> = trimmed.split(' ').collect();
    let value = if parts.len() == 2 && parts[1].contains('/') {
        let whole: f64 = parts[0].parse().ok()?;
        whole + parse_fraction(parts[1])?
    } else if trimmed.contains('/') {
        parse_fraction(trimmed)?
    } else {
        trimmed.parse::<f64>().ok()?
    };

    value.is_finite().then_some(value)
}

/// Closest common fraction within [`FRACTION_TOLERANCE`]; ties keep table order
fn closest_fraction(fractional: f64) -> Option<&'static str> {
    let mut best: Option<(f64, &'static str)> = None;
    for &(decimal, label) in COMMON_FRACTIONS {
        let distance = (fractional - decimal).abs();
        if distance >= FRACTION_TOLERANCE {
            continue;
        }
        if best.map_or(true, |(best_distance, _)| distance < best_distance) {
            best = Some((distance, label));
        }
    }
    best.map(|(_, label)| label)
}

fn format_decimal(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Format a quantity for display, snapping to common kitchen fractions
///
/// Examples:
/// - 1.0 -> "1"
/// - 1.5 -> "1 1/2"
/// - 0.25 -> "1/4"
/// - 2.333 -> "2 1/3"
/// - 2.1 -> "2.1"
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    if (value - rounded).abs() < INTEGER_TOLERANCE {
        // `+ 0.0` folds -0 into 0
        return format!("{:.0}", rounded + 0.0);
    }

    let whole = value.trunc();
    let fractional = value - whole;

    match closest_fraction(fractional) {
        Some(label) if whole == 0.0 => label.to_string(),
        Some(label) => format!("{:.0} {}", whole, label),
        None => format_decimal(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_forms() {
        assert_eq!(parse_quantity("2"), Some(2.0));
        assert_eq!(parse_quantity("1.5"), Some(1.5));
        assert_eq!(parse_quantity("1/2"), Some(0.5));
        assert_eq!(parse_quantity("1 1/2"), Some(1.5));
        assert_eq!(parse_quantity("  3/4  "), Some(0.75));
    }

    #[test]
    fn test_parse_quantity_failures() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("1/0"), None);
        assert_eq!(parse_quantity("1 1/0"), None);
        assert_eq!(parse_quantity("a few"), None);
        assert_eq!(parse_quantity("inf"), None);
        assert_eq!(parse_quantity("NaN"), None);
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_fraction("1/4"), Some(0.25));
        assert_eq!(parse_fraction("3/2"), Some(1.5));
        assert_eq!(parse_fraction("1/2/3"), None);
        assert_eq!(parse_fraction("x/2"), None);
        assert_eq!(parse_fraction("2"), None);
        assert_eq!(parse_fraction("5/0"), None);
    }

    #[test]
    fn test_format_quantity_common_values() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(1.5), "1 1/2");
        assert_eq!(format_quantity(0.5), "1/2");
        assert_eq!(format_quantity(0.25), "1/4");
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(7.0 / 3.0), "2 1/3");
        assert_eq!(format_quantity(0.75), "3/4");
        assert_eq!(format_quantity(2.0 / 3.0), "2/3");
    }

    #[test]
    fn test_format_quantity_near_integer() {
        assert_eq!(format_quantity(1.96), "2");
        assert_eq!(format_quantity(4.04), "4");
        assert_eq!(format_quantity(0.01), "0");
        assert_eq!(format_quantity(-0.01), "0");
    }

    #[test]
    fn test_format_quantity_beyond_i64() {
        assert_eq!(format_quantity(1e20), "100000000000000000000");
        assert_eq!(format_quantity(-3e19), "-30000000000000000000");
        assert_eq!(format_quantity(12345678901.5), "12345678901 1/2");
    }

    #[test]
    fn test_format_quantity_decimal_fallback() {
        assert_eq!(format_quantity(2.1), "2.1");
        assert_eq!(format_quantity(0.1), "0.1");
        assert_eq!(format_quantity(1.9), "1.9");
    }

    #[test]
    fn test_leading_quantity_integer() {
        let token = leading_quantity("2 cups").unwrap();
        assert_eq!(token.whole, Some("2"));
        assert_eq!(token.fraction, None);
        assert_eq!(token.len, 1);
    }

    #[test]
    fn test_leading_quantity_mixed_and_decimal() {
        let mixed = leading_quantity("1 1/2 tsp salt").unwrap();
        assert_eq!(mixed.canonical(), "1 1/2");
        assert_eq!(mixed.len, 5);

        let dotted = leading_quantity("1.1/2 cup").unwrap();
        assert_eq!(dotted.canonical(), "1 1/2");
        assert_eq!(dotted.value(), Some(1.5));

        let decimal = leading_quantity("1.5 kg").unwrap();
        assert_eq!(decimal.canonical(), "1.5");
        assert_eq!(decimal.len, 3);
    }

    #[test]
    fn test_leading_quantity_fraction_and_none() {
        let fraction = leading_quantity("1/2 cup flour").unwrap();
        assert_eq!(fraction.fraction, Some("1/2"));
        assert_eq!(fraction.whole, None);

        assert_eq!(leading_quantity("Salt to taste"), None);
        assert_eq!(leading_quantity(""), None);
    }

    #[test]
    fn test_leading_quantity_attached_unit() {
        let token = leading_quantity("12oz steak").unwrap();
        assert_eq!(token.whole, Some("12"));
        assert_eq!(token.len, 2);
    }
}
