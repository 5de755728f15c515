//! Error type for the `qn` command line.

use qn_uncertainty::UncertaintyError;
use qn_units::UnitError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown unit symbol: {0}")]
    UnknownUnit(String),

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("Uncertainty error: {0}")]
    Uncertainty(#[from] UncertaintyError),
}

pub type CliResult<T> = Result<T, CliError>;
