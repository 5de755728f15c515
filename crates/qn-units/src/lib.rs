//! qn-units: dimensioned quantities for quanta.
//!
//! Provides:
//! - Dimension vectors over the seven SI base axes
//! - Reduced-fraction scale factors and the SI prefix table
//! - Affine origins (celsius, fahrenheit)
//! - Unit descriptors built from the three pieces above
//! - Quantities with checked arithmetic, conversion, comparison and
//!   optional uncertainty propagation
//! - Interop with `uom` typed SI quantities
//! - A small predefined unit catalogue (feature `catalog`)
//!
//! # Example
//!
//! ```
//! use qn_core::Settings;
//! use qn_units::{Dimension, Quantity, Unit, prefix};
//!
//! let s = Settings::default();
//! let joule = Unit::base(Dimension::ENERGY);
//! let millijoule = joule.prefixed(prefix::MILLI, &s).unwrap();
//!
//! let e = Quantity::new(100.0, millijoule).convert_to(&joule).unwrap();
//! assert!((e.value() - 0.1).abs() < 1e-12);
//! ```

#[cfg(feature = "catalog")]
pub mod catalog;
pub mod dimension;
pub mod error;
pub mod origin;
pub mod quantity;
pub mod ratio;
pub mod si;
pub mod unit;

// Re-exports for ergonomics
#[cfg(feature = "catalog")]
pub use catalog::{Catalog, NamedUnit};
pub use dimension::{Axis, AxisSet, Dimension};
pub use error::{UnitError, UnitResult};
pub use origin::Origin;
pub use quantity::Quantity;
pub use ratio::{Ratio, prefix};
pub use si::SiQuantity;
pub use unit::Unit;
