//! Reduced-fraction scale factors.
//!
//! A [`Ratio`] is the factor that converts a unit's magnitude into the base
//! unit of its dimension. Both components are whole, non-negative `f64`
//! values and the pair is always kept in lowest terms. Inputs may already
//! carry rounding noise from earlier combinations, so every integrality and
//! zero test goes through the caller-supplied internal epsilon.

use crate::error::{UnitError, UnitResult};
use qn_core::{Real, float_gcd, is_near_zero, is_whole_non_negative};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRatio"))]
pub struct Ratio {
    num: Real,
    den: Real,
}

/// Unvalidated wire form of a [`Ratio`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRatio {
    num: Real,
    den: Real,
}

/// Deserialized ratios are validated and reduced at machine epsilon.
#[cfg(feature = "serde")]
impl TryFrom<RawRatio> for Ratio {
    type Error = UnitError;

    fn try_from(raw: RawRatio) -> UnitResult<Ratio> {
        Ratio::new(raw.num, raw.den, Real::EPSILON)
    }
}

impl Ratio {
    pub const ONE: Ratio = Ratio::exact(1.0, 1.0);
    pub const ZERO: Ratio = Ratio::exact(0.0, 1.0);

    /// Construct from a pair already known to be in lowest terms.
    const fn exact(num: Real, den: Real) -> Self {
        Self { num, den }
    }

    /// Validate and reduce a raw `(num, den)` pair.
    pub fn new(num: Real, den: Real, eps: Real) -> UnitResult<Self> {
        if !is_whole_non_negative(num, eps) {
            return Err(UnitError::InvalidRatio {
                num,
                den,
                reason: "numerator must be a non-negative whole number",
            });
        }
        if !is_whole_non_negative(den, eps) {
            return Err(UnitError::InvalidRatio {
                num,
                den,
                reason: "denominator must be a non-negative whole number",
            });
        }
        if is_near_zero(den, eps) {
            return Err(UnitError::InvalidRatio {
                num,
                den,
                reason: "denominator must not be zero",
            });
        }
        Ok(Self::reduced(num, den, eps))
    }

    /// Divide both components by their GCD.
    ///
    /// If the Euclid loop does not settle the pair is kept as given: the
    /// value is still right, only the representation is not canonical.
    fn reduced(num: Real, den: Real, eps: Real) -> Self {
        match float_gcd(num, den, eps) {
            Some(g) if g.is_finite() && g > eps => Self {
                num: num / g,
                den: den / g,
            },
            _ => {
                warn!(num, den, "ratio reduction did not converge; keeping unreduced");
                Self { num, den }
            }
        }
    }

    pub fn numer(&self) -> Real {
        self.num
    }

    pub fn denom(&self) -> Real {
        self.den
    }

    /// The scale factor as a plain number.
    pub fn value(&self) -> Real {
        self.num / self.den
    }

    pub fn is_one(&self) -> bool {
        self.num == self.den
    }

    pub fn is_zero(&self, eps: Real) -> bool {
        is_near_zero(self.num, eps)
    }

    /// Swap numerator and denominator.
    pub fn inv(&self, eps: Real) -> UnitResult<Ratio> {
        if is_near_zero(self.num, eps) {
            return Err(UnitError::DivisionByZero {
                what: "ratio inversion",
            });
        }
        Ok(Self {
            num: self.den,
            den: self.num,
        })
    }

    pub fn mul(&self, other: &Ratio, eps: Real) -> UnitResult<Ratio> {
        Ratio::new(self.num * other.num, self.den * other.den, eps)
    }

    pub fn div(&self, other: &Ratio, eps: Real) -> UnitResult<Ratio> {
        self.mul(&other.inv(eps)?, eps)
    }

    /// Multiply by a whole, non-negative scalar.
    pub fn scale_up(&self, k: Real, eps: Real) -> UnitResult<Ratio> {
        Self::check_scalar(k, eps)?;
        Ratio::new(self.num * k, self.den, eps)
    }

    /// Divide by a whole, positive scalar.
    pub fn scale_down(&self, k: Real, eps: Real) -> UnitResult<Ratio> {
        Self::check_scalar(k, eps)?;
        if is_near_zero(k, eps) {
            return Err(UnitError::DivisionByZero {
                what: "ratio scale-down",
            });
        }
        Ratio::new(self.num, self.den * k, eps)
    }

    fn check_scalar(k: Real, eps: Real) -> UnitResult<()> {
        if is_whole_non_negative(k, eps) {
            Ok(())
        } else {
            Err(UnitError::InvalidRatio {
                num: k,
                den: 1.0,
                reason: "scalar must be a non-negative whole number",
            })
        }
    }

    /// Integer power; a negative exponent raises the inverse.
    pub fn pow(&self, n: i32, eps: Real) -> UnitResult<Ratio> {
        let base = if n < 0 { self.inv(eps)? } else { *self };
        let e = n.unsigned_abs();
        Ratio::new(powu(base.num, e), powu(base.den, e), eps)
    }

    /// Integer root; a negative basis roots the inverse.
    ///
    /// Both rooted components must come out whole within `eps`: the square
    /// root of `2/1` is not a ratio and fails with `InvalidRatio`.
    pub fn root(&self, basis: i32, eps: Real) -> UnitResult<Ratio> {
        if basis == 0 {
            return Err(UnitError::ZeroBasis);
        }
        let base = if basis < 0 { self.inv(eps)? } else { *self };
        let inv_b = 1.0 / f64::from(basis.unsigned_abs());
        let num = root_component(base.num, basis.unsigned_abs(), inv_b);
        let den = root_component(base.den, basis.unsigned_abs(), inv_b);

        if !is_whole_non_negative(num, eps) || !is_whole_non_negative(den, eps) {
            return Err(UnitError::InvalidRatio {
                num,
                den,
                reason: "root is not a whole-number ratio",
            });
        }
        Ratio::new(num.round(), den.round(), eps)
    }

    /// Build from a bounded-integer fraction.
    pub fn from_integers(num: i64, den: i64, eps: Real) -> UnitResult<Ratio> {
        Ratio::new(num as Real, den as Real, eps)
    }

    /// Reduced components as `i64`.
    pub fn to_integers(&self) -> UnitResult<(i64, i64)> {
        Ok((
            to_i64(self.num, "ratio numerator")?,
            to_i64(self.den, "ratio denominator")?,
        ))
    }
}

/// `x^(1/b)`, snapped to the nearest whole number when that number raised
/// to `b` gives back `x` exactly (`1e6^(1/3)` is `99.99999999999997` in
/// floating point).
fn root_component(x: Real, b: u32, inv_b: Real) -> Real {
    let r = x.powf(inv_b);
    let snapped = r.round();
    if powu(snapped, b) == x { snapped } else { r }
}

/// `x^e` for an unsigned exponent; `powi` only takes `i32`.
fn powu(x: Real, e: u32) -> Real {
    match i32::try_from(e) {
        Ok(e) => x.powi(e),
        Err(_) => x.powf(Real::from(e)),
    }
}

fn to_i64(v: Real, what: &'static str) -> UnitResult<i64> {
    // i64::MAX is not representable; 2^63 is the first float out of range.
    const LIMIT: Real = 9_223_372_036_854_775_808.0;
    if !v.is_finite() || v >= LIMIT || v < 0.0 || v.fract() != 0.0 {
        return Err(UnitError::Overflow { what, value: v });
    }
    Ok(v as i64)
}

impl TryFrom<Ratio> for (i64, i64) {
    type Error = UnitError;

    fn try_from(r: Ratio) -> UnitResult<(i64, i64)> {
        r.to_integers()
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// SI prefixes as reduced ratios.
pub mod prefix {
    use super::Ratio;

    pub const YOCTO: Ratio = Ratio::exact(1.0, 1e24);
    pub const ZEPTO: Ratio = Ratio::exact(1.0, 1e21);
    pub const ATTO: Ratio = Ratio::exact(1.0, 1e18);
    pub const FEMTO: Ratio = Ratio::exact(1.0, 1e15);
    pub const PICO: Ratio = Ratio::exact(1.0, 1e12);
    pub const NANO: Ratio = Ratio::exact(1.0, 1e9);
    pub const MICRO: Ratio = Ratio::exact(1.0, 1e6);
    pub const MILLI: Ratio = Ratio::exact(1.0, 1e3);
    pub const CENTI: Ratio = Ratio::exact(1.0, 1e2);
    pub const DECI: Ratio = Ratio::exact(1.0, 1e1);
    pub const BASE: Ratio = Ratio::ONE;
    pub const DECA: Ratio = Ratio::exact(1e1, 1.0);
    pub const HECTO: Ratio = Ratio::exact(1e2, 1.0);
    pub const KILO: Ratio = Ratio::exact(1e3, 1.0);
    pub const MEGA: Ratio = Ratio::exact(1e6, 1.0);
    pub const GIGA: Ratio = Ratio::exact(1e9, 1.0);
    pub const TERA: Ratio = Ratio::exact(1e12, 1.0);
    pub const PETA: Ratio = Ratio::exact(1e15, 1.0);
    pub const EXA: Ratio = Ratio::exact(1e18, 1.0);
    pub const ZETTA: Ratio = Ratio::exact(1e21, 1.0);
    pub const YOTTA: Ratio = Ratio::exact(1e24, 1.0);

    /// `(symbol, ratio)` for every prefix, smallest first.
    pub const ALL: [(&str, Ratio); 21] = [
        ("y", YOCTO),
        ("z", ZEPTO),
        ("a", ATTO),
        ("f", FEMTO),
        ("p", PICO),
        ("n", NANO),
        ("u", MICRO),
        ("m", MILLI),
        ("c", CENTI),
        ("d", DECI),
        ("", BASE),
        ("da", DECA),
        ("h", HECTO),
        ("k", KILO),
        ("M", MEGA),
        ("G", GIGA),
        ("T", TERA),
        ("P", PETA),
        ("E", EXA),
        ("Z", ZETTA),
        ("Y", YOTTA),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Real = Real::EPSILON;

    fn r(num: Real, den: Real) -> Ratio {
        Ratio::new(num, den, EPS).unwrap()
    }

    #[test]
    fn reduces_to_lowest_terms() {
        let x = r(6.0, 8.0);
        assert_eq!((x.numer(), x.denom()), (3.0, 4.0));
        let x = r(1000.0, 1_000_000.0);
        assert_eq!((x.numer(), x.denom()), (1.0, 1000.0));
        let x = r(0.0, 7.0);
        assert_eq!((x.numer(), x.denom()), (0.0, 1.0));
    }

    #[test]
    fn rejects_malformed_components() {
        assert!(matches!(
            Ratio::new(-1.0, 2.0, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
        assert!(matches!(
            Ratio::new(1.0, 2.5, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
        assert!(matches!(
            Ratio::new(1.0, 0.0, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
        assert!(matches!(
            Ratio::new(Real::NAN, 1.0, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn multiply_and_divide() {
        let kilo = prefix::KILO;
        let milli = prefix::MILLI;
        assert!(kilo.mul(&milli, EPS).unwrap().is_one());

        let x = r(2.0, 3.0).div(&r(4.0, 9.0), EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (3.0, 2.0));
    }

    #[test]
    fn divide_by_zero_ratio() {
        assert_eq!(
            Ratio::ONE.div(&Ratio::ZERO, EPS),
            Err(UnitError::DivisionByZero {
                what: "ratio inversion"
            })
        );
    }

    #[test]
    fn scalar_scaling() {
        let x = r(1.0, 60.0).scale_up(3.0, EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (1.0, 20.0));
        let x = r(3.0, 1.0).scale_down(6.0, EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (1.0, 2.0));

        assert!(matches!(
            Ratio::ONE.scale_up(1.5, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
        assert!(matches!(
            Ratio::ONE.scale_down(0.0, EPS),
            Err(UnitError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn powers() {
        let x = prefix::CENTI.pow(3, EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (1.0, 1e6));
        let x = r(2.0, 3.0).pow(-2, EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (9.0, 4.0));
        assert!(r(5.0, 7.0).pow(0, EPS).unwrap().is_one());
        assert!(matches!(
            Ratio::ZERO.pow(-1, EPS),
            Err(UnitError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn roots() {
        let x = r(1.0, 1e6).root(3, EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (1.0, 100.0));
        let x = r(4.0, 9.0).root(-2, EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (3.0, 2.0));

        let x = r(8.0, 27.0).root(3, EPS).unwrap();
        assert_eq!((x.numer(), x.denom()), (2.0, 3.0));

        assert_eq!(Ratio::ONE.root(0, EPS), Err(UnitError::ZeroBasis));
    }

    #[test]
    fn irrational_root_is_rejected() {
        assert!(matches!(
            r(2.0, 1.0).root(2, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
        assert!(matches!(
            r(1.0, 2.0).root(-2, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
        // A whole root of one component does not rescue the other.
        assert!(matches!(
            r(4.0, 3.0).root(2, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn integer_interop() {
        let x = Ratio::from_integers(10, 4, EPS).unwrap();
        assert_eq!(x.to_integers().unwrap(), (5, 2));
        let pair: (i64, i64) = prefix::MILLI.try_into().unwrap();
        assert_eq!(pair, (1, 1000));

        assert!(matches!(
            Ratio::from_integers(-1, 4, EPS),
            Err(UnitError::InvalidRatio { .. })
        ));
        assert!(matches!(
            prefix::YOTTA.to_integers(),
            Err(UnitError::Overflow { .. })
        ));
    }

    #[test]
    fn prefixes_are_reduced() {
        for (symbol, p) in prefix::ALL {
            let again = Ratio::new(p.numer(), p.denom(), EPS).unwrap();
            assert_eq!(again, p, "prefix {symbol:?} not in lowest terms");
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn deserialize_reduces() {
        let r: Ratio = serde_json::from_str(r#"{"num": 6.0, "den": 8.0}"#).unwrap();
        assert_eq!((r.numer(), r.denom()), (3.0, 4.0));
    }

    #[test]
    fn deserialize_rejects_malformed() {
        for json in [
            r#"{"num": -1.0, "den": 2.0}"#,
            r#"{"num": 1.5, "den": 2.0}"#,
            r#"{"num": 1.0, "den": 0.0}"#,
        ] {
            let err = serde_json::from_str::<Ratio>(json).unwrap_err();
            assert!(err.to_string().contains("Invalid ratio"), "{json}: {err}");
        }
    }

    #[test]
    fn serialized_form_reads_back() {
        let json = serde_json::to_string(&prefix::KILO).unwrap();
        assert_eq!(serde_json::from_str::<Ratio>(&json).unwrap(), prefix::KILO);
    }
}
