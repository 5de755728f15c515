//! Student-t coverage factors.
//!
//! Tabulated for three coverage probabilities (one, two and three sigma of
//! a normal law) and interpolated linearly in `1/dof` between rows. Above
//! the last finite row the factor tends to the normal value.

use qn_core::Real;

/// Coverage probability of a reported deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Coverage {
    /// 68.27 %
    #[default]
    OneSigma,
    /// 95.45 %
    TwoSigma,
    /// 99.73 %
    ThreeSigma,
}

impl Coverage {
    pub const ALL: [Coverage; 3] = [Coverage::OneSigma, Coverage::TwoSigma, Coverage::ThreeSigma];

    fn column(self) -> usize {
        match self {
            Coverage::OneSigma => 0,
            Coverage::TwoSigma => 1,
            Coverage::ThreeSigma => 2,
        }
    }

    /// Probability in percent.
    pub fn percent(self) -> Real {
        match self {
            Coverage::OneSigma => 68.27,
            Coverage::TwoSigma => 95.45,
            Coverage::ThreeSigma => 99.73,
        }
    }

    /// Coverage factor for `dof` degrees of freedom. `dof == 0` is treated
    /// as one.
    pub fn factor(self, dof: usize) -> Real {
        let col = self.column();
        let x = 1.0 / dof.max(1) as Real;
        if let Some(row) = TABLE.iter().find(|r| r.0 == x) {
            return row.1[col];
        }

        // Rows run from dof = 1 (x = 1) down to infinity (x = 0).
        for pair in TABLE.windows(2) {
            let (hi, lo) = (&pair[0], &pair[1]);
            if x <= hi.0 && x >= lo.0 {
                let span = hi.0 - lo.0;
                let t = (x - lo.0) / span;
                return lo.1[col] + t * (hi.1[col] - lo.1[col]);
            }
        }
        TABLE[0].1[col]
    }
}

macro_rules! row {
    (inf => $a:expr, $b:expr, $c:expr) => {
        (0.0, [$a, $b, $c])
    };
    ($dof:expr => $a:expr, $b:expr, $c:expr) => {
        (1.0 / $dof as Real, [$a, $b, $c])
    };
}

/// `(1/dof, [k68, k95, k99])`, GUM table G.2.
const TABLE: [(Real, [Real; 3]); 28] = [
    row!(1 => 1.84, 13.97, 235.80),
    row!(2 => 1.32, 4.53, 19.21),
    row!(3 => 1.20, 3.31, 9.22),
    row!(4 => 1.14, 2.87, 6.62),
    row!(5 => 1.11, 2.65, 5.51),
    row!(6 => 1.09, 2.52, 4.90),
    row!(7 => 1.08, 2.43, 4.53),
    row!(8 => 1.07, 2.37, 4.28),
    row!(9 => 1.06, 2.32, 4.09),
    row!(10 => 1.05, 2.28, 3.96),
    row!(11 => 1.05, 2.25, 3.85),
    row!(12 => 1.04, 2.23, 3.76),
    row!(13 => 1.04, 2.21, 3.69),
    row!(14 => 1.04, 2.20, 3.64),
    row!(15 => 1.03, 2.18, 3.59),
    row!(16 => 1.03, 2.17, 3.54),
    row!(17 => 1.03, 2.16, 3.51),
    row!(18 => 1.03, 2.15, 3.48),
    row!(19 => 1.03, 2.14, 3.45),
    row!(20 => 1.03, 2.13, 3.42),
    row!(25 => 1.02, 2.11, 3.33),
    row!(30 => 1.02, 2.09, 3.27),
    row!(35 => 1.01, 2.07, 3.23),
    row!(40 => 1.01, 2.06, 3.20),
    row!(45 => 1.01, 2.06, 3.18),
    row!(50 => 1.01, 2.05, 3.16),
    row!(100 => 1.005, 2.025, 3.077),
    row!(inf => 1.000, 2.000, 3.000),
];
