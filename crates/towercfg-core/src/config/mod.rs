//! # Configuration System
//!
//! Resolves the connection settings (host, username, password, TLS
//! verification, OAuth token) used to talk to a Tower/AWX controller.
//!
//! ## Configuration Hierarchy
//!
//! Sources are applied in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - `host = 127.0.0.1`, `verify_ssl = true`
//! 2. **System config** - `/etc/tower/tower_cli.cfg`
//! 3. **User config** - `~/.tower_cli.cfg`
//! 4. **Directory configs** - `.tower_cli.cfg` in each ancestor of the working
//!    directory, outermost first, then the working directory itself
//! 5. **Local config** - `./tower_cli.cfg`
//! 6. **Explicit config** - a file named by the caller; must exist
//! 7. **Direct parameters** - command-line flags or environment (highest priority)
//!
//! Missing discovered files are skipped. A discovered file that exists but is
//! malformed fails the whole resolution.
//!
//! ## File Formats
//!
//! ```yaml
//! # YAML or JSON
//! host: tower.example.com
//! username: admin
//! verify_ssl: false
//! ```
//!
//! ```ini
//! # legacy tower-cli format; [general] may be omitted
//! [general]
//! host = tower.example.com
//! verify_ssl = no
//! ```
//!
//! ## Resolving
//!
//! ```rust,no_run
//! use towercfg_core::config::{ConfigResolver, DirectParams};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolution = ConfigResolver::from_environment()?.resolve(&DirectParams::default())?;
//!     println!("{}", resolution.config.host);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod discovery;
pub mod loading;
pub mod parsing;
pub mod resolver;
pub mod types;

// Public API exports
pub use defaults::{CONFIG_NAME, DEFAULT_HOST, SYSTEM_CONFIG_PATH};
pub use discovery::discover_candidates;
pub use resolver::{ConfigResolver, duplicate_params_warning, duplicated_params, resolve};
pub use types::{
    CandidateOrigin, ConfigCandidate, ConfigLayer, DirectParams, RecognizedField, Resolution,
    ResolvedConfig,
};
