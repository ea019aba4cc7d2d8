//! Number ↔ text conversions with the same canonical form a JavaScript
//! host produces, so literals and printed output match the browser IDE.

/// Render a number the way `String(n)` does in JavaScript.
///
/// Integers print without a fractional part, magnitudes at or above `1e21`
/// or below `1e-6` use exponent notation with an explicit sign.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // covers -0
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Parse `text` as a number only when it is already in canonical form.
///
/// `"5"` and `"-2.5"` are numbers; `"5.0"`, `"+5"`, `"1e3"`, `"NaN"` and
/// `"Infinity"` are not, since converting them back would not reproduce the
/// original text.
pub fn parse_canonical_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let n: f64 = trimmed.parse().ok()?;
    (n.is_finite() && format_number(n) == trimmed).then_some(n)
}
