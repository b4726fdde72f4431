//! Signed display of modifiers.
//!
//! Both the XML sheet and the chat palette show modifiers through
//! [`format_modifier`], so the two outputs always agree.

/// Format a raw modifier cell for display.
///
/// - Values that are not finite numbers are returned unchanged.
/// - Zero becomes `"+0"`.
/// - Negative values keep their own `-` sign.
/// - Positive values gain a leading `+`.
///
/// # Example
///
/// ```
/// use udon5e_common::format_modifier;
///
/// assert_eq!(format_modifier("3"), "+3");
/// assert_eq!(format_modifier("-2"), "-2");
/// assert_eq!(format_modifier("0"), "+0");
/// assert_eq!(format_modifier("n/a"), "n/a");
/// ```
pub fn format_modifier(raw: &str) -> String {
    let Some(value) = parse_number(raw) else {
        return raw.to_string();
    };

    if value == 0.0 {
        "+0".to_string()
    } else if value < 0.0 {
        value.to_string()
    } else {
        format!("+{}", value)
    }
}

/// Parse a cell the way the sheet writes numbers: optional surrounding
/// whitespace, optional sign, decimal digits.
///
/// Hex and binary literals such as `0x10` and the word `Infinity` are not
/// numbers here and pass through unchanged.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // `f64::from_str` also accepts "inf" and "NaN", which the sheet never
    // means as numbers.
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_modifier("0"), "+0");
        assert_eq!(format_modifier("-0"), "+0");
        assert_eq!(format_modifier("+0"), "+0");
    }

    #[test]
    fn test_positive_and_negative() {
        assert_eq!(format_modifier("3"), "+3");
        assert_eq!(format_modifier("+5"), "+5");
        assert_eq!(format_modifier("-2"), "-2");
        assert_eq!(format_modifier(" 4 "), "+4");
        assert_eq!(format_modifier("3.0"), "+3");
        assert_eq!(format_modifier("1.5"), "+1.5");
    }

    #[test]
    fn test_non_numeric_passes_through() {
        for raw in [
            "", "  ", "abc", "1d6", "+", "NaN", "inf", "Infinity", "0x10", "0b11", "３", "2 3",
        ] {
            assert_eq!(format_modifier(raw), raw, "input {:?}", raw);
        }
    }
}
