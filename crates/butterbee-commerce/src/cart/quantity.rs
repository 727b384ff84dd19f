//! Coercion of raw quantity input.

use crate::error::CommerceError;

/// Read a shopper-entered quantity.
///
/// Accepts integers and integral decimals ("3", " 4 ", "2.0"). Anything else,
/// including fractional values, is rejected so the caller can keep the
/// previous cart state.
pub fn parse_quantity(raw: &str) -> Result<i64, CommerceError> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(CommerceError::InvalidQuantity(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("-2").unwrap(), -2);
        assert_eq!(parse_quantity("2.0").unwrap(), 2);
    }

    #[test]
    fn test_rejects_non_integers() {
        for raw in ["", "abc", "2.5", "NaN", "inf", "1e400", "3 apples"] {
            assert!(
                matches!(parse_quantity(raw), Err(CommerceError::InvalidQuantity(_))),
                "accepted {:?}",
                raw
            );
        }
    }
}
