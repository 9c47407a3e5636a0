//! Result formatting
//!
//! Fixed display precision with trailing zeros trimmed. Magnitudes too large
//! for plain notation, and non-zero values that would round to zero, switch
//! to exponent notation.

/// Magnitude from which results are shown in exponent notation
pub const SCIENTIFIC_THRESHOLD: f64 = 1e15;

/// Formats a number for display (removes trailing zeros)
#[must_use]
pub fn format_number(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() < SCIENTIFIC_THRESHOLD {
        let fixed = trim_fraction(&format!("{value:.precision$}"));
        if fixed != "0" && fixed != "-0" {
            return fixed;
        }
    }
    let scientific = format!("{value:.precision$e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
        None => scientific,
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
