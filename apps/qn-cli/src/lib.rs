//! qn-cli: command line front end for quanta.
//!
//! The binary (`qn`) only parses arguments and prints; the pieces here are
//! shared with the integration tests.

pub mod commands;
pub mod config;
pub mod error;

pub use config::{ConfigFile, load_settings, parse_settings};
pub use error::{CliError, CliResult};
