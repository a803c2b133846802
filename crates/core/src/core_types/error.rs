//! Domain errors raised by the scale-up formulas
//!
//! Every formula returns `Result<f64, ScaleUpError>`. Errors are values handed
//! back to the caller; nothing in the formula layer panics on bad input.

use serde::Serialize;

/// Errors that can occur while evaluating a scale-up formula
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScaleUpError {
    /// A caller-supplied denominator was zero
    DivisionByZero {
        /// Formula being evaluated (e.g. `"spray rate scale-up"`)
        operation: &'static str,
        /// Name of the zero-valued parameter (e.g. `"AV1"`)
        denominator: &'static str,
    },
    /// An input lies outside the formula's domain (negative, non-finite, ...),
    /// or the result overflowed
    InvalidDomain {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Value that was supplied
        value: f64,
        /// Constraint that was violated (e.g. `"must be positive"`)
        constraint: &'static str,
    },
}

impl ScaleUpError {
    /// Name of the parameter responsible for the error
    pub fn parameter(&self) -> &'static str {
        match self {
            ScaleUpError::DivisionByZero { denominator, .. } => *denominator,
            ScaleUpError::InvalidDomain { parameter, .. } => *parameter,
        }
    }

    /// True for the zero-denominator case
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, ScaleUpError::DivisionByZero { .. })
    }
}

impl std::fmt::Display for ScaleUpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleUpError::DivisionByZero {
                operation,
                denominator,
            } => write!(f, "Division by zero in {operation}: {denominator} must be non-zero"),
            ScaleUpError::InvalidDomain {
                parameter,
                value,
                constraint,
            } => write!(f, "Invalid {parameter}: {constraint}, got {value}"),
        }
    }
}

impl std::error::Error for ScaleUpError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_message() {
        let err = ScaleUpError::DivisionByZero {
            operation: "spray rate scale-up",
            denominator: "AV1",
        };
        assert_eq!(
            err.to_string(),
            "Division by zero in spray rate scale-up: AV1 must be non-zero"
        );
        assert!(err.is_division_by_zero());
        assert_eq!(err.parameter(), "AV1");
    }

    #[test]
    fn test_invalid_domain_message() {
        let err = ScaleUpError::InvalidDomain {
            parameter: "diameter",
            value: -1.0,
            constraint: "must be positive",
        };
        assert_eq!(err.to_string(), "Invalid diameter: must be positive, got -1");
        assert!(!err.is_division_by_zero());
    }
}
