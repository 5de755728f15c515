//! Error types for uncertainty combination.

use qn_units::UnitError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UncertaintyError {
    #[error("Insufficient samples: need at least 2, got {got}")]
    InsufficientSamples { got: usize },

    #[error("Non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),
}

pub type UncertaintyResult<T> = Result<T, UncertaintyError>;
