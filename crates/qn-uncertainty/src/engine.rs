//! Statistical + systematic error combination.

use crate::coverage::Coverage;
use crate::error::{UncertaintyError, UncertaintyResult};
use crate::law::Law;
use qn_core::{Real, Settings};
use qn_units::{Quantity, Unit};
use tracing::debug;

/// Central value and deviation produced by [`UncertaintyEngine::combine`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    pub value: Real,
    pub deviation: Real,
}

impl Estimate {
    /// Quantity in `unit` carrying the deviation as its uncertainty.
    pub fn into_quantity(self, unit: Unit, settings: Settings) -> Quantity {
        Quantity::with_settings(self.value, unit, settings).with_uncertainty(self.deviation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyEngine {
    systematic_quad_threshold: usize,
    coverage: Coverage,
}

impl Default for UncertaintyEngine {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl UncertaintyEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            systematic_quad_threshold: settings.systematic_quad_threshold,
            coverage: Coverage::default(),
        }
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Combine repeated `samples` with `systematic` error contributions.
    ///
    /// The statistical part is the standard error of the mean widened by the
    /// coverage factor for `n - 1` degrees of freedom, then rescaled by the
    /// law. Systematic errors add linearly up to the configured threshold
    /// and in quadrature beyond it.
    pub fn combine(
        &self,
        samples: &[Real],
        systematic: &[Real],
        law: Law,
    ) -> UncertaintyResult<Estimate> {
        let n = samples.len();
        if n < 2 {
            return Err(UncertaintyError::InsufficientSamples { got: n });
        }
        check_finite(samples, "sample")?;
        check_finite(systematic, "systematic error")?;

        let count = n as Real;
        let mean = samples.iter().sum::<Real>() / count;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<Real>() / (count - 1.0);
        let k = self.coverage.factor(n - 1);
        let deviation = law.deviation((variance / count).sqrt() * k);

        let syst = self.systematic(systematic);
        let value = mean.hypot(syst);

        debug!(
            samples = n,
            systematic = systematic.len(),
            mean,
            syst,
            k,
            %law,
            "combined uncertainty"
        );
        Ok(Estimate { value, deviation })
    }

    fn systematic(&self, errors: &[Real]) -> Real {
        let threshold = self.systematic_quad_threshold;
        if threshold == 0 || errors.len() <= threshold {
            errors.iter().sum()
        } else {
            errors.iter().map(|z| z * z).sum::<Real>().sqrt()
        }
    }
}

/// [`UncertaintyEngine::combine`] with default settings.
pub fn combine(samples: &[Real], systematic: &[Real], law: Law) -> UncertaintyResult<Estimate> {
    UncertaintyEngine::default().combine(samples, systematic, law)
}

fn check_finite(values: &[Real], what: &'static str) -> UncertaintyResult<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(UncertaintyError::NonFinite { what, value }),
        None => Ok(()),
    }
}
