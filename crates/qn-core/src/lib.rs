//! qn-core: stable foundation for quanta.
//!
//! Contains:
//! - numeric (Real + epsilons + float helpers used by the unit algebra)
//! - settings (the process-wide configuration object)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod settings;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use settings::Settings;
