//! towercfg-core: Core library for Tower/AWX connection settings
//!
//! This library merges config files, environment-derived values, and
//! command-line parameters into the single set of settings a Tower/AWX
//! client needs before it opens a connection.
//!
//! # Main Entry Points
//!
//! - [`config`] - Discovery, parsing, and precedence resolution
//! - [`errors`] - Error types with stable error codes
//! - [`logging`] - Structured logging setup

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;

// Re-export commonly used types at crate root for convenience
pub use config::{ConfigResolver, DirectParams, Resolution, ResolvedConfig};
pub use errors::{ConfigFileError, ResolveError, TowercfgError};

// Re-export logging initialization
pub use logging::init_logging;
