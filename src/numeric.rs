//! Locale-tolerant numeric coercion for CTF fields.
//!
//! Instruments write decimals with either a period or a comma depending on
//! the acquisition machine's locale; both are accepted everywhere a float is
//! read.

use crate::constants::TRIPLET_DELIMITER;
use crate::error::FieldError;
use std::borrow::Cow;

/// Replace comma decimal separators with periods
pub fn normalize_decimal(text: &str) -> Cow<'_, str> {
    if text.contains(',') {
        Cow::Owned(text.replace(',', "."))
    } else {
        Cow::Borrowed(text)
    }
}

/// Parse a float written with either decimal convention
pub fn parse_float(text: &str) -> Result<f64, FieldError> {
    let normalized = normalize_decimal(text.trim());
    normalized
        .parse::<f64>()
        .map_err(|source| FieldError::InvalidFloat {
            text: text.to_string(),
            source,
        })
}

pub fn parse_integer(text: &str) -> Result<i64, FieldError> {
    text.trim()
        .parse::<i64>()
        .map_err(|source| FieldError::InvalidInteger {
            text: text.to_string(),
            source,
        })
}

/// Parse a float and truncate it toward zero
pub fn parse_truncated_integer(text: &str) -> Result<i64, FieldError> {
    let value = parse_float(text)?;
    if !value.is_finite() {
        return Err(FieldError::NonFiniteValue {
            text: text.to_string(),
        });
    }

    // 2^63 is exact as an f64; anything at or past it would saturate
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= -(i64::MIN as f64) {
        return Err(FieldError::IntegerOutOfRange {
            text: text.to_string(),
        });
    }
    Ok(truncated as i64)
}

/// Parse `a;b;c` into three floats; parts after the third are ignored
pub fn parse_triplet(text: &str) -> Result<[f64; 3], FieldError> {
    let normalized = normalize_decimal(text.trim());
    let parts: Vec<&str> = normalized.split(TRIPLET_DELIMITER).collect();
    if parts.len() < 3 {
        return Err(FieldError::InvalidTriplet {
            text: text.to_string(),
            found: parts.len(),
        });
    }

    Ok([
        parse_float(parts[0])?,
        parse_float(parts[1])?,
        parse_float(parts[2])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_float_accepts_both_separators() {
        assert_eq!(parse_float("1.5").unwrap(), 1.5);
        assert_eq!(parse_float("1,5").unwrap(), 1.5);
        assert_eq!(parse_float(" 0,25 ").unwrap(), 0.25);
        assert_eq!(parse_float("-3").unwrap(), -3.0);
    }

    #[test]
    fn test_parse_float_rejects_garbage() {
        assert!(matches!(
            parse_float("abc"),
            Err(FieldError::InvalidFloat { .. })
        ));
        assert!(parse_float("").is_err());
        assert!(parse_float("1,234,5").is_err());
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("512").unwrap(), 512);
        assert_eq!(parse_integer(" 7 ").unwrap(), 7);
        assert!(matches!(
            parse_integer("1.5"),
            Err(FieldError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_parse_truncated_integer() {
        assert_eq!(parse_truncated_integer("20").unwrap(), 20);
        assert_eq!(parse_truncated_integer("20.9").unwrap(), 20);
        assert_eq!(parse_truncated_integer("15,7").unwrap(), 15);
        assert_eq!(parse_truncated_integer("-2.5").unwrap(), -2);
        assert!(matches!(
            parse_truncated_integer("inf"),
            Err(FieldError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_parse_truncated_integer_rejects_out_of_range() {
        assert_eq!(
            parse_truncated_integer("1e30"),
            Err(FieldError::IntegerOutOfRange {
                text: "1e30".to_string()
            })
        );
        assert!(parse_truncated_integer("-1e19").is_err());
        assert!(parse_truncated_integer("9223372036854775808").is_err());
        assert_eq!(
            parse_truncated_integer("-9223372036854775808").unwrap(),
            i64::MIN
        );
    }

    #[test]
    fn test_parse_triplet() {
        assert_eq!(parse_triplet("3.52;3.52;3.52").unwrap(), [3.52, 3.52, 3.52]);
        assert_eq!(parse_triplet("90,0;90;120").unwrap(), [90.0, 90.0, 120.0]);
        assert_eq!(parse_triplet("1;2;3;4").unwrap(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_triplet_too_short() {
        assert_eq!(
            parse_triplet("1;2"),
            Err(FieldError::InvalidTriplet {
                text: "1;2".to_string(),
                found: 2
            })
        );
        assert!(parse_triplet("1;x;3").is_err());
    }

    proptest! {
        #[test]
        fn prop_comma_and_period_parse_identically(whole in 0u32..100_000, frac in 0u32..1000) {
            let period = format!("{}.{}", whole, frac);
            let comma = format!("{},{}", whole, frac);
            prop_assert_eq!(parse_float(&period).unwrap(), parse_float(&comma).unwrap());
        }

        #[test]
        fn prop_triplet_members_are_locale_invariant(a in 0u32..1000, b in 0u32..1000, c in 0u32..1000) {
            let period = format!("{a}.5;{b}.25;{c}.125");
            let comma = format!("{a},5;{b},25;{c},125");
            prop_assert_eq!(parse_triplet(&period).unwrap(), parse_triplet(&comma).unwrap());
        }
    }
}
