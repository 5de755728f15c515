//! Dimension exponent algebra.
//!
//! Every physical quantity has dimensions in the 7 SI base quantities. A
//! [`Dimension`] stores the integer exponent of each one. Products and
//! quotients of quantities add and subtract exponents; additive operations
//! require equal exponents.

use crate::error::{UnitError, UnitResult};
use std::fmt;

/// One of the 7 SI base axes, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    LuminousIntensity,
}

impl Axis {
    pub const ALL: [Axis; 7] = [
        Axis::Length,
        Axis::Mass,
        Axis::Time,
        Axis::Current,
        Axis::Temperature,
        Axis::Amount,
        Axis::LuminousIntensity,
    ];

    /// Short code used when formatting a dimension.
    pub const fn code(self) -> &'static str {
        match self {
            Axis::Length => "L",
            Axis::Mass => "M",
            Axis::Time => "Tm",
            Axis::Current => "I",
            Axis::Temperature => "Tp",
            Axis::Amount => "N",
            Axis::LuminousIntensity => "J",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Axis::Length => "length",
            Axis::Mass => "mass",
            Axis::Time => "time",
            Axis::Current => "current",
            Axis::Temperature => "temperature",
            Axis::Amount => "amount",
            Axis::LuminousIntensity => "luminous intensity",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Compact set of axes, used to report which exponents failed a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisSet(u8);

impl AxisSet {
    pub const EMPTY: AxisSet = AxisSet(0);

    pub const fn with(self, axis: Axis) -> Self {
        Self(self.0 | axis.bit())
    }

    pub const fn contains(self, axis: Axis) -> bool {
        self.0 & axis.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl fmt::Display for AxisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for axis in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", axis.name())?;
            first = false;
        }
        Ok(())
    }
}

/// Exponents of the 7 SI base quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub length: i32,
    pub mass: i32,
    pub time: i32,
    pub current: i32,
    pub temperature: i32,
    pub amount: i32,
    pub luminous_intensity: i32,
}

impl Dimension {
    // ==========================================================================
    // Base Dimensions
    // ==========================================================================

    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0, 0, 0);
    pub const LENGTH: Self = Self::new(1, 0, 0, 0, 0, 0, 0);
    pub const MASS: Self = Self::new(0, 1, 0, 0, 0, 0, 0);
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0, 0, 0);
    pub const CURRENT: Self = Self::new(0, 0, 0, 1, 0, 0, 0);
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 0, 1, 0, 0);
    pub const AMOUNT: Self = Self::new(0, 0, 0, 0, 0, 1, 0);
    pub const LUMINOUS_INTENSITY: Self = Self::new(0, 0, 0, 0, 0, 0, 1);

    // ==========================================================================
    // Common Derived Dimensions
    // ==========================================================================

    pub const AREA: Self = Self::LENGTH.pow(2);
    pub const VOLUME: Self = Self::LENGTH.pow(3);
    pub const FREQUENCY: Self = Self::TIME.recip();
    pub const VELOCITY: Self = Self::LENGTH.div(&Self::TIME);
    pub const ACCELERATION: Self = Self::VELOCITY.div(&Self::TIME);
    pub const FORCE: Self = Self::MASS.mul(&Self::ACCELERATION);
    pub const ENERGY: Self = Self::FORCE.mul(&Self::LENGTH);
    pub const POWER: Self = Self::ENERGY.div(&Self::TIME);
    pub const PRESSURE: Self = Self::FORCE.div(&Self::AREA);
    pub const DENSITY: Self = Self::MASS.div(&Self::VOLUME);
    pub const MASS_RATE: Self = Self::MASS.div(&Self::TIME);
    pub const CHARGE: Self = Self::CURRENT.mul(&Self::TIME);
    pub const VOLTAGE: Self = Self::POWER.div(&Self::CURRENT);

    pub const fn new(
        length: i32,
        mass: i32,
        time: i32,
        current: i32,
        temperature: i32,
        amount: i32,
        luminous_intensity: i32,
    ) -> Self {
        Self {
            length,
            mass,
            time,
            current,
            temperature,
            amount,
            luminous_intensity,
        }
    }

    /// Exponents in canonical axis order.
    pub const fn components(&self) -> [i32; 7] {
        [
            self.length,
            self.mass,
            self.time,
            self.current,
            self.temperature,
            self.amount,
            self.luminous_intensity,
        ]
    }

    pub const fn from_components(c: [i32; 7]) -> Self {
        Self::new(c[0], c[1], c[2], c[3], c[4], c[5], c[6])
    }

    pub const fn exponent(&self, axis: Axis) -> i32 {
        self.components()[axis as usize]
    }

    /// Multiply dimensions (add exponents).
    pub const fn mul(&self, other: &Dimension) -> Dimension {
        Dimension {
            length: self.length + other.length,
            mass: self.mass + other.mass,
            time: self.time + other.time,
            current: self.current + other.current,
            temperature: self.temperature + other.temperature,
            amount: self.amount + other.amount,
            luminous_intensity: self.luminous_intensity + other.luminous_intensity,
        }
    }

    /// Divide dimensions (subtract exponents).
    pub const fn div(&self, other: &Dimension) -> Dimension {
        self.mul(&other.recip())
    }

    /// Negate all exponents.
    pub const fn recip(&self) -> Dimension {
        self.pow(-1)
    }

    /// Raise to an integer power (multiply all exponents).
    pub const fn pow(&self, n: i32) -> Dimension {
        Dimension {
            length: self.length * n,
            mass: self.mass * n,
            time: self.time * n,
            current: self.current * n,
            temperature: self.temperature * n,
            amount: self.amount * n,
            luminous_intensity: self.luminous_intensity * n,
        }
    }

    // The const forms above build the derived constants and assume small
    // exponents. Runtime unit algebra goes through the checked forms below.

    /// [`Self::mul`] failing with `Overflow` instead of wrapping.
    pub fn checked_mul(&self, other: &Dimension) -> UnitResult<Dimension> {
        self.combine(other, |a, b| a + b)
    }

    /// [`Self::div`] failing with `Overflow` instead of wrapping.
    pub fn checked_div(&self, other: &Dimension) -> UnitResult<Dimension> {
        self.combine(other, |a, b| a - b)
    }

    /// [`Self::pow`] failing with `Overflow` instead of wrapping.
    pub fn checked_pow(&self, n: i32) -> UnitResult<Dimension> {
        self.combine(&Dimension::DIMENSIONLESS, |a, _| a * i64::from(n))
    }

    /// Component-wise `f` in `i64`, narrowed back to `i32`.
    fn combine(&self, other: &Dimension, f: impl Fn(i64, i64) -> i64) -> UnitResult<Dimension> {
        let (lhs, rhs) = (self.components(), other.components());
        let mut out = [0i32; 7];
        for ((slot, a), b) in out.iter_mut().zip(lhs).zip(rhs) {
            let e = f(i64::from(a), i64::from(b));
            *slot = i32::try_from(e).map_err(|_| UnitError::Overflow {
                what: "dimension exponent",
                value: e as f64,
            })?;
        }
        Ok(Self::from_components(out))
    }

    /// Integer root: every exponent must be a multiple of `basis`.
    pub fn root(&self, basis: i32) -> UnitResult<Dimension> {
        if basis == 0 {
            return Err(UnitError::ZeroBasis);
        }

        let failing = self.indivisible_axes(basis);
        if !failing.is_empty() {
            return Err(UnitError::NonIntegralDimension {
                dimension: *self,
                basis,
                axes: failing,
            });
        }

        // `i32::MIN / -1` does not fit.
        self.combine(&Dimension::DIMENSIONLESS, |e, _| e / i64::from(basis))
    }

    /// Axes whose exponent is not a multiple of `basis` (`basis != 0`).
    pub fn indivisible_axes(&self, basis: i32) -> AxisSet {
        Axis::ALL
            .into_iter()
            .filter(|a| i64::from(self.exponent(*a)) % i64::from(basis) != 0)
            .fold(AxisSet::EMPTY, AxisSet::with)
    }

    pub const fn is_dimensionless(&self) -> bool {
        self.length == 0
            && self.mass == 0
            && self.time == 0
            && self.current == 0
            && self.temperature == 0
            && self.amount == 0
            && self.luminous_intensity == 0
    }

    /// Error unless `self == other`.
    pub fn ensure_same(&self, other: &Dimension) -> UnitResult<()> {
        if self == other {
            Ok(())
        } else {
            Err(UnitError::DimensionMismatch {
                left: *self,
                right: *other,
            })
        }
    }
}

/// `[L2][M1][Tm-2]` style, `[1]` when dimensionless.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "[1]");
        }
        for axis in Axis::ALL {
            let e = self.exponent(axis);
            if e != 0 {
                write!(f, "[{}{}]", axis.code(), e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_constants() {
        assert_eq!(Dimension::ENERGY, Dimension::new(2, 1, -2, 0, 0, 0, 0));
        assert_eq!(Dimension::PRESSURE, Dimension::new(-1, 1, -2, 0, 0, 0, 0));
        assert_eq!(Dimension::VOLTAGE, Dimension::new(2, 1, -3, -1, 0, 0, 0));
        assert_eq!(Dimension::FREQUENCY, Dimension::new(0, 0, -1, 0, 0, 0, 0));
    }

    #[test]
    fn formatting() {
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "[1]");
        assert_eq!(Dimension::ENERGY.to_string(), "[L2][M1][Tm-2]");
        assert_eq!(Dimension::TEMPERATURE.to_string(), "[Tp1]");
        assert_eq!(
            Dimension::new(0, 0, 0, 1, 0, -1, 2).to_string(),
            "[I1][N-1][J2]"
        );
    }

    #[test]
    fn root_of_even_dimension() {
        let area = Dimension::AREA;
        assert_eq!(area.root(2).unwrap(), Dimension::LENGTH);
        assert_eq!(area.root(-2).unwrap(), Dimension::LENGTH.recip());
    }

    #[test]
    fn root_rejects_odd_exponent() {
        let err = Dimension::LENGTH.root(2).unwrap_err();
        match err {
            UnitError::NonIntegralDimension { basis, axes, .. } => {
                assert_eq!(basis, 2);
                assert!(axes.contains(Axis::Length));
                assert_eq!(axes.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn root_names_every_failing_axis() {
        let err = Dimension::ENERGY.root(2).unwrap_err();
        assert!(err.to_string().contains("mass"));
        let err = Dimension::VELOCITY.root(3).unwrap_err();
        assert!(err.to_string().contains("length, time"));
    }

    #[test]
    fn root_zero_basis() {
        assert_eq!(Dimension::AREA.root(0), Err(UnitError::ZeroBasis));
    }

    #[test]
    fn checked_algebra_reports_overflow() {
        assert!(matches!(
            Dimension::AREA.checked_pow(1 << 30),
            Err(UnitError::Overflow {
                what: "dimension exponent",
                ..
            })
        ));
        let big = Dimension::LENGTH.pow(i32::MAX);
        assert!(matches!(
            big.checked_mul(&Dimension::LENGTH),
            Err(UnitError::Overflow { .. })
        ));
        assert!(matches!(
            big.recip().checked_div(&Dimension::AREA),
            Err(UnitError::Overflow { .. })
        ));
        assert_eq!(
            Dimension::LENGTH.pow(i32::MIN).root(-1),
            Err(UnitError::Overflow {
                what: "dimension exponent",
                value: 2_147_483_648.0,
            })
        );
    }

    #[test]
    fn mismatch_check() {
        assert!(Dimension::LENGTH.ensure_same(&Dimension::LENGTH).is_ok());
        assert!(matches!(
            Dimension::LENGTH.ensure_same(&Dimension::MASS),
            Err(UnitError::DimensionMismatch { .. })
        ));
    }
}
