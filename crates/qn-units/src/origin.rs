//! Affine origins.
//!
//! An [`Origin`] is the base-unit value that a unit's zero maps to (273.15 for
//! celsius against kelvin). Combining origins under multiplicative operations
//! depends on [`Settings::true_zero`].

use crate::error::{UnitError, UnitResult};
use qn_core::{Real, Settings, is_near_zero};
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Origin(pub Real);

impl Origin {
    pub const ZERO: Origin = Origin(0.0);

    pub fn value(self) -> Real {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Origin of a product unit; always zero in true-zero mode.
    pub fn product(self, other: Origin, settings: &Settings) -> Origin {
        if settings.true_zero {
            Origin::ZERO
        } else {
            Origin(self.0 * other.0)
        }
    }

    /// Origin of a quotient unit.
    ///
    /// Zero in true-zero mode, and zero when the divisor is within the
    /// comparison tolerance of zero.
    pub fn division(self, other: Origin, settings: &Settings) -> Origin {
        if settings.true_zero {
            return Origin::ZERO;
        }
        if is_near_zero(other.0, settings.comparison_eps()) {
            if !is_near_zero(self.0, settings.comparison_eps()) {
                trace!(origin = self.0, divisor = other.0, "origin division guard");
            }
            return Origin::ZERO;
        }
        Origin(self.0 / other.0)
    }

    /// Integer power; a zero origin stays zero for every exponent.
    pub fn pow(self, n: i32) -> Origin {
        if self.is_zero() {
            return Origin::ZERO;
        }
        Origin(self.0.powi(n))
    }

    pub fn root(self, basis: i32) -> UnitResult<Origin> {
        if basis == 0 {
            return Err(UnitError::ZeroBasis);
        }
        Ok(Origin(self.0.powf(1.0 / f64::from(basis))))
    }
}

impl From<Real> for Origin {
    fn from(v: Real) -> Self {
        Origin(v)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
