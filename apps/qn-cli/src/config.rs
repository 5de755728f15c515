//! YAML configuration for the `qn` tool.
//!
//! The file is a flat mapping; every key is optional and falls back to
//! [`Settings::default`]:
//!
//! ```yaml
//! internal_eps: machine     # or a number, 0 for exact
//! comparison_eps: 1.0e-9
//! true_zero: false
//! propagate_uncertainty: true
//! systematic_quad_threshold: 3
//! ```

use crate::error::{CliError, CliResult};
use qn_core::{Epsilon, Settings, TolerancePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_eps: Option<EpsilonSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_eps: Option<EpsilonSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_zero: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagate_uncertainty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systematic_quad_threshold: Option<usize>,
}

/// `machine` or an explicit non-negative number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpsilonSpec {
    Value(f64),
    Named(EpsilonName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpsilonName {
    Machine,
}

impl EpsilonSpec {
    fn resolve(self, key: &str) -> CliResult<Epsilon> {
        match self {
            EpsilonSpec::Named(EpsilonName::Machine) => Ok(Epsilon::Machine),
            EpsilonSpec::Value(v) => Epsilon::explicit(v)
                .map_err(|e| CliError::InvalidConfig(format!("{key}: {e}"))),
        }
    }
}

impl ConfigFile {
    /// Apply the file on top of the defaults.
    pub fn into_settings(self) -> CliResult<Settings> {
        let defaults = Settings::default();
        let tolerance = TolerancePolicy {
            internal: match self.internal_eps {
                Some(e) => e.resolve("internal_eps")?,
                None => defaults.tolerance.internal,
            },
            comparison: match self.comparison_eps {
                Some(e) => e.resolve("comparison_eps")?,
                None => defaults.tolerance.comparison,
            },
        };
        Ok(Settings {
            tolerance,
            true_zero: self.true_zero.unwrap_or(defaults.true_zero),
            propagate_uncertainty: self
                .propagate_uncertainty
                .unwrap_or(defaults.propagate_uncertainty),
            systematic_quad_threshold: self
                .systematic_quad_threshold
                .unwrap_or(defaults.systematic_quad_threshold),
        })
    }
}

pub fn parse_settings(yaml: &str) -> CliResult<Settings> {
    // An empty document deserializes as null.
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }
    let file: ConfigFile = serde_yaml::from_str(yaml)?;
    file.into_settings()
}

pub fn load_settings(path: Option<&Path>) -> CliResult<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&content)?;
    tracing::debug!(path = %path.display(), ?settings, "loaded config");
    Ok(settings)
}
