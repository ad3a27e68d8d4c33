//! Number formatting for the display and history text.

/// Maximum characters shown before the display switches to 10 significant digits.
const MAX_PLAIN_WIDTH: usize = 10;

/// Significant digits used for long values.
const PRECISION: i32 = 10;

/// Format a finite number as canonical display text.
///
/// Integers print without a fractional part, everything else uses the
/// shortest text that parses back to the same value. Negative zero is
/// shown as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Format display text for presentation.
///
/// Text up to ten characters is shown as is. Longer numbers are rounded to
/// ten significant digits, switching to exponent notation for very small
/// or very large magnitudes. Non-numeric text (the error sentinel, a
/// half-typed `"0."`) is passed through untouched.
pub fn format_for_display(text: &str) -> String {
    let Ok(value) = text.parse::<f64>() else {
        return text.to_string();
    };
    if !value.is_finite() || format_number(value).len() <= MAX_PLAIN_WIDTH {
        return text.to_string();
    }
    to_precision(value)
}

fn to_precision(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Round in scientific form first so the exponent reflects any carry
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -6 || exponent >= PRECISION {
        let sign = if exponent < 0 { "-" } else { "+" };
        format!("{mantissa}e{sign}{}", exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        format!("{value:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_decimals_round_trip() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(std::f64::consts::PI), "3.141592653589793");
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(format_for_display("10"), "10");
        assert_eq!(format_for_display("0."), "0.");
        assert_eq!(format_for_display("12.50"), "12.50");
        assert_eq!(format_for_display("Error"), "Error");
    }

    #[test]
    fn test_long_text_uses_ten_significant_digits() {
        assert_eq!(format_for_display("3.141592653589793"), "3.141592654");
        assert_eq!(format_for_display("0.30000000000000004"), "0.3000000000");
        assert_eq!(format_for_display("123456.78901234"), "123456.7890");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(
            format_for_display("0.00000000000000012246467991473532"),
            "1.224646799e-16"
        );
        assert_eq!(format_for_display("123456789012"), "1.234567890e+11");
    }
}
