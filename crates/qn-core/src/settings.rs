//! Process-wide engine configuration.
//!
//! Every constant the engine consults lives here and is handed to
//! constructors explicitly. A `Settings` value is `Copy` and is never mutated
//! after a quantity or unit has been built from it.

use crate::numeric::{Real, TolerancePolicy};

/// Default number of systematic errors summed linearly before switching to
/// quadrature.
pub const DEFAULT_SYSTEMATIC_QUAD_THRESHOLD: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Internal and comparison epsilons.
    pub tolerance: TolerancePolicy,
    /// When set, multiplicative operations ignore affine origins:
    /// `0 °C * 10 == 0 °C` instead of `2458.35 °C`.
    pub true_zero: bool,
    /// Propagate uncertainties through arithmetic.
    pub propagate_uncertainty: bool,
    /// Systematic errors at or under this count are summed linearly, above it
    /// in quadrature. Zero disables quadrature.
    pub systematic_quad_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: TolerancePolicy::default(),
            true_zero: false,
            propagate_uncertainty: false,
            systematic_quad_threshold: DEFAULT_SYSTEMATIC_QUAD_THRESHOLD,
        }
    }
}

impl Settings {
    pub fn internal_eps(&self) -> Real {
        self.tolerance.internal()
    }

    pub fn comparison_eps(&self) -> Real {
        self.tolerance.comparison()
    }

    pub fn with_true_zero(mut self, on: bool) -> Self {
        self.true_zero = on;
        self
    }

    pub fn with_uncertainty(mut self, on: bool) -> Self {
        self.propagate_uncertainty = on;
        self
    }

    pub fn with_tolerance(mut self, tolerance: TolerancePolicy) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_systematic_quad_threshold(mut self, threshold: usize) -> Self {
        self.systematic_quad_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Epsilon;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert!(!s.true_zero);
        assert!(!s.propagate_uncertainty);
        assert_eq!(s.systematic_quad_threshold, 3);
        assert_eq!(s.internal_eps(), Real::EPSILON);
        assert_eq!(s.comparison_eps(), Real::EPSILON);
    }

    #[test]
    fn builders_do_not_touch_other_fields() {
        let s = Settings::default()
            .with_true_zero(true)
            .with_tolerance(TolerancePolicy {
                internal: Epsilon::Explicit(0.0),
                comparison: Epsilon::Explicit(1e-9),
            });
        assert!(s.true_zero);
        assert!(!s.propagate_uncertainty);
        assert_eq!(s.internal_eps(), 0.0);
        assert_eq!(s.comparison_eps(), 1e-9);
    }
}
