//! Unit descriptors.
//!
//! A [`Unit`] is fully described by its dimension, its scale relative to the
//! dimension's base unit and its affine origin. New units are derived from
//! existing ones at definition time (kilojoule from joule and a kilo prefix,
//! pascal from newton over square metre).

use crate::dimension::Dimension;
use crate::error::{UnitError, UnitResult};
use crate::origin::Origin;
use crate::ratio::Ratio;
use qn_core::{Real, Settings, ensure_finite};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawUnit"))]
pub struct Unit {
    dimension: Dimension,
    scale: Ratio,
    origin: Origin,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUnit {
    dimension: Dimension,
    scale: Ratio,
    origin: Origin,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUnit> for Unit {
    type Error = UnitError;

    fn try_from(raw: RawUnit) -> UnitResult<Unit> {
        Unit::new(raw.dimension, raw.scale, raw.origin)
    }
}

impl Unit {
    /// Build a unit descriptor. The scale must be non-zero.
    pub fn new(dimension: Dimension, scale: Ratio, origin: Origin) -> UnitResult<Self> {
        if scale.numer() == 0.0 {
            return Err(UnitError::InvalidRatio {
                num: scale.numer(),
                den: scale.denom(),
                reason: "unit scale must not be zero",
            });
        }
        ensure_finite(origin.value(), "unit origin")?;
        Ok(Self {
            dimension,
            scale,
            origin,
        })
    }

    /// The base unit of a dimension: scale 1, origin 0.
    pub const fn base(dimension: Dimension) -> Self {
        Self {
            dimension,
            scale: Ratio::ONE,
            origin: Origin::ZERO,
        }
    }

    pub const DIMENSIONLESS: Unit = Unit::base(Dimension::DIMENSIONLESS);

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn scale(&self) -> Ratio {
        self.scale
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_base(&self) -> bool {
        self.scale.is_one() && self.origin.is_zero()
    }

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Value in the base unit of a magnitude expressed in this unit.
    pub fn to_base(&self, value: Real) -> Real {
        value * self.scale.value() + self.origin.value()
    }

    /// Magnitude in this unit of a base-unit value.
    pub fn from_base(&self, base: Real) -> Real {
        (base - self.origin.value()) / self.scale.value()
    }

    /// Product unit: dimensions add, scales multiply, origins per settings.
    pub fn mul(&self, other: &Unit, settings: &Settings) -> UnitResult<Unit> {
        let unit = Unit::new(
            self.dimension.checked_mul(&other.dimension)?,
            self.scale.mul(&other.scale, settings.internal_eps())?,
            self.origin.product(other.origin, settings),
        )?;
        debug!(lhs = %self, rhs = %other, result = %unit, "unit product");
        Ok(unit)
    }

    /// Quotient unit.
    pub fn div(&self, other: &Unit, settings: &Settings) -> UnitResult<Unit> {
        let unit = Unit::new(
            self.dimension.checked_div(&other.dimension)?,
            self.scale.div(&other.scale, settings.internal_eps())?,
            self.origin.division(other.origin, settings),
        )?;
        debug!(lhs = %self, rhs = %other, result = %unit, "unit quotient");
        Ok(unit)
    }

    /// Integer power. The zeroth power is the dimensionless base unit.
    pub fn pow(&self, n: i32, settings: &Settings) -> UnitResult<Unit> {
        if n == 0 {
            return Ok(Unit::DIMENSIONLESS);
        }
        Unit::new(
            self.dimension.checked_pow(n)?,
            self.scale.pow(n, settings.internal_eps())?,
            self.origin.pow(n),
        )
    }

    /// Integer root; fails if any dimension exponent does not divide.
    pub fn root(&self, basis: i32, settings: &Settings) -> UnitResult<Unit> {
        Unit::new(
            self.dimension.root(basis)?,
            self.scale.root(basis, settings.internal_eps())?,
            self.origin.root(basis)?,
        )
    }

    /// Same dimension and origin, scale multiplied by `prefix`.
    pub fn prefixed(&self, prefix: Ratio, settings: &Settings) -> UnitResult<Unit> {
        Unit::new(
            self.dimension,
            self.scale.mul(&prefix, settings.internal_eps())?,
            self.origin,
        )
    }

    /// Scale multiplied by a whole number (`minute` is `second` scaled up 60).
    pub fn scaled_up(&self, k: Real, settings: &Settings) -> UnitResult<Unit> {
        Unit::new(
            self.dimension,
            self.scale.scale_up(k, settings.internal_eps())?,
            self.origin,
        )
    }

    /// Scale divided by a whole number.
    pub fn scaled_down(&self, k: Real, settings: &Settings) -> UnitResult<Unit> {
        Unit::new(
            self.dimension,
            self.scale.scale_down(k, settings.internal_eps())?,
            self.origin,
        )
    }

    /// Same dimension and scale, different origin.
    pub fn with_origin(&self, origin: Origin) -> UnitResult<Unit> {
        Unit::new(self.dimension, self.scale, origin)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.dimension, self.scale)?;
        if !self.origin.is_zero() {
            write!(f, " +{}", self.origin)?;
        }
        Ok(())
    }
}
