//! Probability laws of a measurement error.

use qn_core::Real;
use std::f64::consts::SQRT_2;

/// Distribution assumed for an error source.
///
/// The factor of a law turns a half-width of variation into a standard
/// deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Law {
    #[default]
    None,
    Normal,
    Uniform,
    Triangular,
    Asymmetric,
    Arcsine,
    UniformGap,
}

const SQRT_3: Real = 1.732_050_807_568_877_2;
const SQRT_6: Real = 2.449_489_742_783_178;

impl Law {
    pub const ALL: [Law; 7] = [
        Law::None,
        Law::Normal,
        Law::Uniform,
        Law::Triangular,
        Law::Asymmetric,
        Law::Arcsine,
        Law::UniformGap,
    ];

    pub fn factor(self) -> Real {
        match self {
            Law::None | Law::Normal => 1.0,
            Law::Uniform => SQRT_3,
            Law::Triangular => SQRT_6,
            Law::Asymmetric => 3.0 * SQRT_2,
            Law::Arcsine => SQRT_2,
            Law::UniformGap => 2.0 * SQRT_3,
        }
    }

    /// Standard deviation of a variation distributed under this law.
    pub fn deviation(self, variation: Real) -> Real {
        variation / self.factor()
    }

    pub fn name(self) -> &'static str {
        match self {
            Law::None => "none",
            Law::Normal => "normal",
            Law::Uniform => "uniform",
            Law::Triangular => "triangular",
            Law::Asymmetric => "asymmetric",
            Law::Arcsine => "arcsine",
            Law::UniformGap => "uniform_gap",
        }
    }
}

impl std::str::FromStr for Law {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Law::ALL
            .into_iter()
            .find(|l| l.name() == s)
            .ok_or_else(|| format!("unknown law '{s}'"))
    }
}

impl std::fmt::Display for Law {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
