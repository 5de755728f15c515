use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Upper bound on Euclid steps in [`float_gcd`].
///
/// Integer-valued floats finish in well under a hundred steps; anything that
/// runs this long is noise that will never reach zero.
pub const GCD_MAX_STEPS: usize = 2048;

/// Absolute + relative tolerance pair.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Same epsilon used as both absolute and relative bound.
    pub fn uniform(eps: Real) -> Self {
        Self { abs: eps, rel: eps }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Where an epsilon comes from.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Epsilon {
    /// `Real::EPSILON`
    #[default]
    Machine,
    /// Explicit value; `0.0` means exact comparisons.
    Explicit(Real),
}

impl Epsilon {
    /// Validated explicit epsilon: finite and non-negative.
    pub fn explicit(v: Real) -> Result<Self, CoreError> {
        ensure_finite(v, "epsilon")?;
        if v < 0.0 {
            return Err(CoreError::InvalidArg {
                what: "epsilon must not be negative",
            });
        }
        Ok(Self::Explicit(v))
    }

    pub fn value(self) -> Real {
        match self {
            Self::Machine => Real::EPSILON,
            Self::Explicit(v) => v.abs(),
        }
    }
}

/// The two epsilons of the engine.
///
/// `internal` drives ratio reduction and integrality checks, `comparison`
/// drives equality and ordering between quantities. They are independent.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TolerancePolicy {
    pub internal: Epsilon,
    pub comparison: Epsilon,
}

impl TolerancePolicy {
    pub fn internal(&self) -> Real {
        self.internal.value()
    }

    pub fn comparison(&self) -> Real {
        self.comparison.value()
    }

    /// Tolerances used for user-facing equality.
    ///
    /// Equivalent to `|a - b| <= eps * max(1, |a|, |b|)`.
    pub fn comparison_tolerances(&self) -> Tolerances {
        Tolerances::uniform(self.comparison())
    }
}

/// Floating remainder `a - floor(a / b) * b`.
///
/// `rem_euclid` computes the same quantity without the rounding error of the
/// explicit formula, which matters once `a / b` is large.
#[inline]
pub fn float_mod(a: Real, b: Real) -> Real {
    a.rem_euclid(b)
}

/// Euclidean GCD on floats, stopping once the remainder is within `eps`.
///
/// Returns `None` when the iteration does not settle within
/// [`GCD_MAX_STEPS`].
pub fn float_gcd(a: Real, b: Real, eps: Real) -> Option<Real> {
    let mut a = a.abs();
    let mut b = b.abs();
    for _ in 0..GCD_MAX_STEPS {
        if b <= eps {
            return Some(a);
        }
        let r = float_mod(a, b);
        a = b;
        b = r;
    }
    None
}

/// True if `v` is non-negative and has no fractional part (within `eps`).
#[inline]
pub fn is_whole_non_negative(v: Real, eps: Real) -> bool {
    v.is_finite() && v >= 0.0 && (v - v.floor()).abs() <= eps
}

/// True if `v` is within `eps` of zero.
#[inline]
pub fn is_near_zero(v: Real, eps: Real) -> bool {
    v.abs() <= eps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn zero_tolerance_is_exact() {
        let tol = Tolerances::uniform(0.0);
        assert!(nearly_equal(0.1, 0.1, tol));
        assert!(!nearly_equal(0.1, 0.1 + Real::EPSILON, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn explicit_epsilon_is_validated() {
        assert_eq!(Epsilon::explicit(1e-9), Ok(Epsilon::Explicit(1e-9)));
        assert_eq!(Epsilon::explicit(0.0), Ok(Epsilon::Explicit(0.0)));
        assert!(matches!(
            Epsilon::explicit(-1e-9),
            Err(CoreError::InvalidArg { .. })
        ));
        assert!(matches!(
            Epsilon::explicit(Real::INFINITY),
            Err(CoreError::NonFinite { .. })
        ));
    }

    #[test]
    fn epsilon_sources() {
        assert_eq!(Epsilon::Machine.value(), Real::EPSILON);
        assert_eq!(Epsilon::Explicit(0.0).value(), 0.0);
        assert_eq!(Epsilon::Explicit(-1e-9).value(), 1e-9);

        let policy = TolerancePolicy {
            internal: Epsilon::Machine,
            comparison: Epsilon::Explicit(1e-6),
        };
        assert_eq!(policy.internal(), Real::EPSILON);
        assert_eq!(policy.comparison(), 1e-6);
    }

    #[test]
    fn gcd_of_whole_floats() {
        assert_eq!(float_gcd(12.0, 18.0, Real::EPSILON), Some(6.0));
        assert_eq!(float_gcd(1e3, 1e6, Real::EPSILON), Some(1e3));
        assert_eq!(float_gcd(0.0, 5.0, Real::EPSILON), Some(5.0));
        assert_eq!(float_gcd(7.0, 1.0, Real::EPSILON), Some(1.0));
    }

    #[test]
    fn float_mod_matches_floor_formula() {
        assert_eq!(float_mod(7.0, 3.0), 1.0);
        assert_eq!(float_mod(6.0, 3.0), 0.0);
        assert_eq!(float_mod(2.5, 1.0), 0.5);
    }

    #[test]
    fn whole_number_check() {
        let eps = Real::EPSILON;
        assert!(is_whole_non_negative(0.0, eps));
        assert!(is_whole_non_negative(1e6, eps));
        assert!(!is_whole_non_negative(1.5, eps));
        assert!(!is_whole_non_negative(-2.0, eps));
        assert!(!is_whole_non_negative(Real::INFINITY, eps));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn gcd_divides_both(a in 0u32..100_000, b in 1u32..100_000) {
            let g = float_gcd(a as Real, b as Real, Real::EPSILON).unwrap();
            prop_assert!(g >= 1.0);
            prop_assert_eq!(float_mod(a as Real, g), 0.0);
            prop_assert_eq!(float_mod(b as Real, g), 0.0);
        }
    }
}
