//! Runtime quantities.
//!
//! A [`Quantity`] is a magnitude expressed in a [`Unit`], optionally paired
//! with an absolute uncertainty in the same unit. It carries the
//! [`Settings`] it was built with; binary operations follow the settings of
//! the left operand.
//!
//! Additive operations and comparisons bring the right operand into the left
//! operand's unit. Multiplicative operations work on base-unit values and
//! express the result in the derived unit, which is where the true-zero
//! switch matters:
//!
//! - true-zero off: `0 °C * 10` is `2731.5 K`, i.e. `2458.35 °C`
//! - true-zero on: `0 °C * 10` is `0 °C`

use crate::dimension::Dimension;
use crate::error::{UnitError, UnitResult};
use crate::unit::Unit;
use qn_core::{CoreError, Real, Settings, is_near_zero, nearly_equal};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Neg};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    value: Real,
    unit: Unit,
    uncertainty: Option<Real>,
    settings: Settings,
}

impl Quantity {
    /// Quantity with default settings.
    pub fn new(value: Real, unit: Unit) -> Self {
        Self::with_settings(value, unit, Settings::default())
    }

    pub fn with_settings(value: Real, unit: Unit, settings: Settings) -> Self {
        Self {
            value,
            unit,
            uncertainty: None,
            settings,
        }
    }

    /// Attach an absolute uncertainty (same unit as the value).
    pub fn with_uncertainty(mut self, uncertainty: Real) -> Self {
        self.uncertainty = Some(uncertainty.abs());
        self
    }

    pub fn without_uncertainty(mut self) -> Self {
        self.uncertainty = None;
        self
    }

    pub fn value(&self) -> Real {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    pub fn uncertainty(&self) -> Option<Real> {
        self.uncertainty
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Uncertainty relative to the magnitude; `None` without uncertainty or
    /// for a zero magnitude.
    pub fn relative_uncertainty(&self) -> Option<Real> {
        let u = self.uncertainty?;
        if self.value == 0.0 {
            None
        } else {
            Some(u / self.value.abs())
        }
    }

    /// Value expressed in the dimension's base unit.
    pub fn base_value(&self) -> Real {
        self.unit.to_base(self.value)
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// Express the same physical value in `target`.
    pub fn convert_to(&self, target: &Unit) -> UnitResult<Quantity> {
        self.dimension().ensure_same(&target.dimension())?;
        let value = target.from_base(self.base_value());
        debug!(from = %self.unit, to = %target, value, "convert");
        Ok(Quantity {
            value,
            unit: *target,
            uncertainty: self
                .uncertainty
                .map(|u| u * self.unit.scale().value() / target.scale().value()),
            settings: self.settings,
        })
    }

    // =========================================================================
    // Additive arithmetic
    // =========================================================================

    pub fn try_add(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        self.additive(rhs, 1.0)
    }

    pub fn try_sub(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        self.additive(rhs, -1.0)
    }

    fn additive(&self, rhs: &Quantity, sign: Real) -> UnitResult<Quantity> {
        let rhs = rhs.convert_to(&self.unit)?;
        let uncertainty = self.propagate(Some(&rhs), || {
            self.uncertainty
                .unwrap_or(0.0)
                .hypot(rhs.uncertainty.unwrap_or(0.0))
        });
        Ok(Quantity {
            value: self.value + sign * rhs.value,
            unit: self.unit,
            uncertainty,
            settings: self.settings,
        })
    }

    // =========================================================================
    // Multiplicative arithmetic
    // =========================================================================

    pub fn try_mul(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let unit = self.unit.mul(&rhs.unit, &self.settings)?;
        let (b1, b2) = (self.multiplicative_base(), rhs.multiplicative_base());
        let uncertainty = self.propagate(Some(rhs), || {
            let (u1, u2) = (self.base_uncertainty(), rhs.base_uncertainty());
            (b2 * u1).hypot(b1 * u2) / unit.scale().value()
        });
        Ok(self.derived(unit, b1 * b2, uncertainty))
    }

    pub fn try_div(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let (b1, b2) = (self.multiplicative_base(), rhs.multiplicative_base());
        if is_near_zero(b2, self.settings.internal_eps()) {
            return Err(UnitError::DivisionByZero {
                what: "quantity division",
            });
        }
        let unit = self.unit.div(&rhs.unit, &self.settings)?;
        let uncertainty = self.propagate(Some(rhs), || {
            let (u1, u2) = (self.base_uncertainty(), rhs.base_uncertainty());
            (u1 / b2).hypot(b1 * u2 / (b2 * b2)) / unit.scale().value()
        });
        Ok(self.derived(unit, b1 / b2, uncertainty))
    }

    /// Multiply by a pure number.
    pub fn scale(&self, k: Real) -> Quantity {
        let value = if self.settings.true_zero {
            self.value * k
        } else {
            self.unit.from_base(self.base_value() * k)
        };
        Quantity {
            value,
            unit: self.unit,
            uncertainty: self.propagate(None, || self.uncertainty.unwrap_or(0.0) * k.abs()),
            settings: self.settings,
        }
    }

    pub fn powi(&self, n: i32) -> UnitResult<Quantity> {
        let unit = self.unit.pow(n, &self.settings)?;
        let b = self.multiplicative_base();
        let uncertainty = self.propagate(None, || {
            let slope = match n.checked_sub(1) {
                _ if n == 0 => 0.0,
                Some(m) => Real::from(n) * b.powi(m),
                None => Real::from(n) * b.powf(Real::from(n) - 1.0),
            };
            (slope * self.base_uncertainty()).abs() / unit.scale().value()
        });
        Ok(self.derived(unit, b.powi(n), uncertainty))
    }

    pub fn root(&self, basis: i32) -> UnitResult<Quantity> {
        let unit = self.unit.root(basis, &self.settings)?;
        let b = self.multiplicative_base();
        let rooted = b.powf(1.0 / Real::from(basis));
        if !rooted.is_finite() {
            return Err(CoreError::NonFinite {
                what: "quantity root",
                value: rooted,
            }
            .into());
        }
        let uncertainty = self.propagate(None, || {
            let ub = self.base_uncertainty();
            let u = if b == 0.0 {
                ub.powf(1.0 / Real::from(basis.abs()))
            } else {
                (rooted / (Real::from(basis) * b)).abs() * ub
            };
            u / unit.scale().value()
        });
        Ok(self.derived(unit, rooted, uncertainty))
    }

    pub fn sqrt(&self) -> UnitResult<Quantity> {
        self.root(2)
    }

    /// Base value entering a product: the origin is ignored in true-zero
    /// mode.
    fn multiplicative_base(&self) -> Real {
        if self.settings.true_zero {
            self.value * self.unit.scale().value()
        } else {
            self.base_value()
        }
    }

    /// Uncertainty in base-unit scale (origins never apply); zero when
    /// absent.
    fn base_uncertainty(&self) -> Real {
        self.uncertainty.unwrap_or(0.0) * self.unit.scale().value()
    }

    /// Express a multiplicative base value in `unit`, mirroring
    /// [`Self::multiplicative_base`].
    fn derived(&self, unit: Unit, base: Real, uncertainty: Option<Real>) -> Quantity {
        let value = if self.settings.true_zero {
            base / unit.scale().value()
        } else {
            unit.from_base(base)
        };
        Quantity {
            value,
            unit,
            uncertainty,
            settings: self.settings,
        }
    }

    /// Run `f` only when propagation is on and some operand carries an
    /// uncertainty.
    fn propagate(&self, rhs: Option<&Quantity>, f: impl FnOnce() -> Real) -> Option<Real> {
        let any = self.uncertainty.is_some() || rhs.is_some_and(|q| q.uncertainty.is_some());
        (self.settings.propagate_uncertainty && any).then(f)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// `(self, rhs)` magnitudes in the left operand's unit.
    fn comparable(&self, rhs: &Quantity) -> UnitResult<(Real, Real)> {
        let rhs = rhs.convert_to(&self.unit)?;
        Ok((self.value, rhs.value))
    }

    pub fn try_eq(&self, rhs: &Quantity) -> UnitResult<bool> {
        let (a, b) = self.comparable(rhs)?;
        Ok(nearly_equal(
            a,
            b,
            self.settings.tolerance.comparison_tolerances(),
        ))
    }

    pub fn try_ne(&self, rhs: &Quantity) -> UnitResult<bool> {
        Ok(!self.try_eq(rhs)?)
    }

    /// Ordering with tolerance-equal values reported as `Equal`.
    pub fn try_cmp(&self, rhs: &Quantity) -> UnitResult<Ordering> {
        let (a, b) = self.comparable(rhs)?;
        if nearly_equal(a, b, self.settings.tolerance.comparison_tolerances()) {
            return Ok(Ordering::Equal);
        }
        a.partial_cmp(&b).ok_or_else(|| {
            UnitError::from(CoreError::NonFinite {
                what: "quantity comparison",
                value: if a.is_nan() { a } else { b },
            })
        })
    }

    pub fn try_lt(&self, rhs: &Quantity) -> UnitResult<bool> {
        Ok(self.try_cmp(rhs)? == Ordering::Less)
    }

    pub fn try_le(&self, rhs: &Quantity) -> UnitResult<bool> {
        Ok(self.try_cmp(rhs)? != Ordering::Greater)
    }

    pub fn try_gt(&self, rhs: &Quantity) -> UnitResult<bool> {
        Ok(self.try_cmp(rhs)? == Ordering::Greater)
    }

    pub fn try_ge(&self, rhs: &Quantity) -> UnitResult<bool> {
        Ok(self.try_cmp(rhs)? != Ordering::Less)
    }
}

impl Mul<Real> for Quantity {
    type Output = Quantity;

    fn mul(self, k: Real) -> Quantity {
        self.scale(k)
    }
}

impl Mul<Quantity> for Real {
    type Output = Quantity;

    fn mul(self, q: Quantity) -> Quantity {
        q.scale(self)
    }
}

impl Div<Real> for Quantity {
    type Output = Quantity;

    fn div(self, k: Real) -> Quantity {
        self.scale(1.0 / k)
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.scale(-1.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(u) = self.uncertainty {
            write!(f, " ± {}", u)?;
        }
        write!(f, " {}", self.unit)
    }
}
