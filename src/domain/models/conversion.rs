//! Conversion results, amount validation, and display formatting.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{ApiError, ApiResult};

/// Largest accepted conversion amount.
pub const MAX_AMOUNT: f64 = 999_999_999_999.0;

/// A completed currency conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// Amount in the source currency.
    pub amount: f64,
    /// Exchange rate applied (1 `from` = `rate` `to`).
    pub rate: f64,
    /// Amount in the target currency.
    pub converted: f64,
}

impl Conversion {
    /// Build a conversion from an amount and a rate.
    pub fn new(from: &str, to: &str, amount: f64, rate: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            rate,
            converted: amount * rate,
        }
    }

    /// Render the result line shown to the user, e.g.
    /// `"1,234.00 USD = EUR 1,135.28"`.
    pub fn display(&self) -> String {
        format!(
            "{} {} = {} {}",
            format_amount(self.amount),
            self.from,
            self.to,
            format_amount(self.converted)
        )
    }
}

/// Validate a conversion amount.
///
/// Accepts finite values greater than zero up to [`MAX_AMOUNT`].
pub fn validate_amount(value: f64) -> ApiResult<f64> {
    if !value.is_finite() {
        return Err(ApiError::InvalidAmount("not a number".to_string()));
    }
    if value <= 0.0 {
        return Err(ApiError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(ApiError::InvalidAmount("amount too large".to_string()));
    }
    Ok(value)
}

/// Format a value with two decimals and thousand separators.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, dec_part) = match fixed.split_once('.') {
        Some((i, d)) => (i, d),
        None => (fixed.as_str(), "00"),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{dec_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_display() {
        let conversion = Conversion::new("USD", "EUR", 100.0, 0.92);
        assert_eq!(conversion.converted, 92.0);
        assert_eq!(conversion.display(), "100.00 USD = EUR 92.00");
    }

    #[test]
    fn test_display_with_thousand_separators() {
        let conversion = Conversion::new("USD", "IDR", 1_234.0, 1000.5);
        assert_eq!(conversion.display(), "1,234.00 USD = IDR 1,234,617.00");
    }

    #[test]
    fn test_format_amount_groups_digits() {
        assert_eq!(format_amount(0.5), "0.50");
        assert_eq!(format_amount(999.0), "999.00");
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn test_validate_amount_accepts_positive_values() {
        assert_eq!(validate_amount(1.0).unwrap(), 1.0);
        assert_eq!(validate_amount(MAX_AMOUNT).unwrap(), MAX_AMOUNT);
    }

    #[test]
    fn test_validate_amount_rejects_bad_input() {
        assert!(matches!(
            validate_amount(0.0),
            Err(ApiError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(-5.0),
            Err(ApiError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(f64::NAN),
            Err(ApiError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(MAX_AMOUNT + 1.0),
            Err(ApiError::InvalidAmount(_))
        ));
    }
}
