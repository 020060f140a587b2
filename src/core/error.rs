//! Validation errors raised by the calculators and stores.
//!
//! The `Display` text of each variant is the message shown to the user, so
//! the CLI can print it as-is next to the input that caused it.
use thiserror::Error;

/// Rejected user input for the calculators and the converter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Annual income is missing, not a number, or not positive.
    #[error("Please enter a valid annual income (got '{0}')")]
    InvalidIncome(String),

    /// Assessed property value is missing, not a number, or not positive.
    #[error("Please enter a valid assessed value (got '{0}')")]
    InvalidPropertyValue(String),

    /// Amount to convert is missing, not a number, or not positive.
    #[error("Please enter a valid amount (got '{0}')")]
    InvalidAmount(String),

    /// Source and target currency are the same.
    #[error("Please choose two different currencies")]
    SameCurrency,

    /// A currency code that is not three ASCII letters.
    #[error("Unknown currency code: {0}")]
    InvalidCurrency(String),

    /// Unrecognized choice for an enumerated input (property type, car class, ...).
    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },
}

/// Reasons the glossary refuses a mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlossaryError {
    #[error("Please fill in every field")]
    MissingField,

    #[error("'{0}' is already in the glossary")]
    DuplicateTerm(String),

    #[error("Please choose a valid category ({0})")]
    InvalidCategory(String),
}

/// Parses a user-entered number, accepting surrounding whitespace and
/// thousands separators.
pub fn parse_number(input: &str) -> Option<f64> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a strictly positive amount, mapping failures through `err`.
pub fn parse_positive<E>(input: &str, err: impl FnOnce(String) -> E) -> Result<f64, E> {
    match parse_number(input) {
        Some(v) if v > 0.0 => Ok(v),
        _ => Err(err(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 500 "), Some(500.0));
        assert_eq!(parse_number("1,200.5"), Some(1200.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_parse_positive_rejects_zero_and_negative() {
        assert!(parse_positive("0", ValidationError::InvalidIncome).is_err());
        assert!(parse_positive("-3", ValidationError::InvalidIncome).is_err());
        assert_eq!(
            parse_positive("x", ValidationError::InvalidAmount).unwrap_err(),
            ValidationError::InvalidAmount("x".to_string())
        );
        assert_eq!(parse_positive("12", ValidationError::InvalidAmount), Ok(12.0));
    }
}
