//! qn-uncertainty: measurement uncertainty for quanta.
//!
//! Combines repeated samples and systematic error contributions into a
//! central value and a deviation, which can then seed a
//! [`qn_units::Quantity`].
//!
//! # Example
//!
//! ```
//! use qn_uncertainty::{Law, combine};
//!
//! let e = combine(&[10.0, 10.0, 10.0], &[], Law::Normal).unwrap();
//! assert_eq!(e.value, 10.0);
//! assert_eq!(e.deviation, 0.0);
//! ```

pub mod coverage;
pub mod engine;
pub mod error;
pub mod law;

pub use coverage::Coverage;
pub use engine::{Estimate, UncertaintyEngine, combine};
pub use error::{UncertaintyError, UncertaintyResult};
pub use law::Law;
