//! Unit algebra errors.

use crate::dimension::{AxisSet, Dimension};
use qn_core::CoreError;
use thiserror::Error;

/// Result type for unit algebra and quantity operations.
pub type UnitResult<T> = Result<T, UnitError>;

/// Errors raised while defining units or operating on quantities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Malformed numerator/denominator.
    #[error("Invalid ratio {num}/{den}: {reason}")]
    InvalidRatio {
        num: f64,
        den: f64,
        reason: &'static str,
    },

    /// Division by a value within tolerance of zero.
    #[error("Division by zero in {what}")]
    DivisionByZero { what: &'static str },

    /// Root whose exponents do not divide evenly.
    #[error("Cannot take root {basis} of dimension {dimension}: non-integral exponent for {axes}")]
    NonIntegralDimension {
        dimension: Dimension,
        basis: i32,
        axes: AxisSet,
    },

    /// Additive operation or comparison between incompatible dimensions.
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: Dimension, right: Dimension },

    /// Ratio component does not fit the bounded integer target.
    #[error("Overflow converting {what}: {value} exceeds the integer range")]
    Overflow { what: &'static str, value: f64 },

    /// Root with basis 0.
    #[error("Root basis must not be zero")]
    ZeroBasis,

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UnitError::DimensionMismatch {
            left: Dimension::LENGTH,
            right: Dimension::MASS,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: [L1] vs [M1]");

        let err = UnitError::InvalidRatio {
            num: 1.5,
            den: 2.0,
            reason: "numerator is not a whole number",
        };
        assert!(err.to_string().contains("1.5/2"));
    }

    #[test]
    fn core_error_wraps() {
        let err: UnitError = CoreError::InvalidArg { what: "x" }.into();
        assert!(matches!(err, UnitError::Core(_)));
    }
}
