//! Core arithmetic: operators, scientific functions, numerals and history
//!
//! Nothing in here knows about keys or display flags; the engine composes
//! these pieces into key transitions.

pub mod history;
pub mod numeral;
mod operations;

pub use operations::{BinaryOp, ScientificFn};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, DomainError>;

/// Text shown in place of a number after a domain error
pub const ERROR_MARKER: &str = "Error";

/// Arithmetic domain errors
///
/// Every variant renders as [`ERROR_MARKER`] on the display; the variant
/// only survives for logging and for callers that want the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainError {
    /// Division with a zero divisor
    #[error("division by zero")]
    DivisionByZero,
    /// `ln` or `log` of zero or a negative number
    #[error("logarithm of a non-positive number")]
    LogOfNonPositive,
    /// Square root of a negative number
    #[error("square root of a negative number")]
    SqrtOfNegative,
    /// The result overflowed to infinity or is NaN
    #[error("result is not a finite number")]
    NonFinite,
}

/// Rejects NaN and infinities so the display always holds a finite numeral
pub(crate) fn check_finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        assert_eq!(DomainError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            DomainError::LogOfNonPositive.to_string(),
            "logarithm of a non-positive number"
        );
        assert_eq!(
            DomainError::SqrtOfNegative.to_string(),
            "square root of a negative number"
        );
        assert_eq!(
            DomainError::NonFinite.to_string(),
            "result is not a finite number"
        );
    }

    #[test]
    fn test_domain_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::DivisionByZero);
        assert!(err.to_string().contains("division"));
    }

    #[test]
    fn test_domain_error_serialize() {
        let json = serde_json::to_string(&DomainError::SqrtOfNegative).unwrap();
        assert_eq!(json, "\"sqrt_of_negative\"");
    }

    #[test]
    fn test_check_finite() {
        assert_eq!(check_finite(1.5), Ok(1.5));
        assert_eq!(check_finite(f64::NAN), Err(DomainError::NonFinite));
        assert_eq!(check_finite(f64::INFINITY), Err(DomainError::NonFinite));
        assert_eq!(check_finite(f64::NEG_INFINITY), Err(DomainError::NonFinite));
    }
}
