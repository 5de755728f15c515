//! Command implementations, independent of argument parsing and printing.

use crate::error::{CliError, CliResult};
use qn_core::{Real, Settings};
use qn_uncertainty::{Coverage, Estimate, Law, UncertaintyEngine};
use qn_units::{Catalog, NamedUnit, Quantity, Unit};
use serde::Serialize;

pub fn lookup<'a>(catalog: &'a Catalog, symbol: &str) -> CliResult<&'a Unit> {
    catalog
        .get(symbol)
        .ok_or_else(|| CliError::UnknownUnit(symbol.to_string()))
}

pub fn convert(
    catalog: &Catalog,
    settings: Settings,
    value: Real,
    uncertainty: Option<Real>,
    from: &str,
    to: &str,
) -> CliResult<Quantity> {
    let mut q = Quantity::with_settings(value, *lookup(catalog, from)?, settings);
    if let Some(u) = uncertainty {
        q = q.with_uncertainty(u);
    }
    Ok(q.convert_to(lookup(catalog, to)?)?)
}

/// Catalogue entries, optionally restricted to the dimension of `like`.
pub fn units<'a>(catalog: &'a Catalog, like: Option<&str>) -> CliResult<Vec<&'a NamedUnit>> {
    Ok(match like {
        Some(symbol) => {
            let dimension = lookup(catalog, symbol)?.dimension();
            catalog.of_dimension(dimension).collect()
        }
        None => catalog.iter().collect(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombineReport {
    pub samples: usize,
    pub systematic: usize,
    pub law: Law,
    pub coverage: Coverage,
    pub estimate: Estimate,
}

pub fn combine(
    settings: &Settings,
    samples: &[Real],
    systematic: &[Real],
    law: Law,
    coverage: Coverage,
) -> CliResult<CombineReport> {
    let estimate = UncertaintyEngine::new(settings)
        .with_coverage(coverage)
        .combine(samples, systematic, law)?;
    Ok(CombineReport {
        samples: samples.len(),
        systematic: systematic.len(),
        law,
        coverage,
        estimate,
    })
}

pub fn parse_coverage(s: &str) -> Result<Coverage, String> {
    match s {
        "1" | "68" | "one_sigma" => Ok(Coverage::OneSigma),
        "2" | "95" | "two_sigma" => Ok(Coverage::TwoSigma),
        "3" | "99" | "three_sigma" => Ok(Coverage::ThreeSigma),
        _ => Err(format!("unknown coverage '{s}' (expected 1, 2 or 3 sigma)")),
    }
}
