//! Configuration type definitions for towercfg.
//!
//! `ResolvedConfig` is the final record handed to network code. Every source
//! (a config file, or the caller's direct parameters) contributes a partial
//! `ConfigLayer`, and layers are applied on top of the built-in defaults in
//! precedence order.
//!
//! # Example Configuration
//!
//! ```yaml
//! # ~/.tower_cli.cfg
//! host: tower.example.com
//! username: admin
//! verify_ssl: false
//! ```
//!
//! ```ini
//! # legacy format, the [general] header is optional
//! [general]
//! host = tower.example.com
//! verify_ssl = no
//! ```

use secrecy::SecretString;
use std::fmt;
use std::path::PathBuf;

/// One of the keys read from config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizedField {
    Host,
    Username,
    Password,
    VerifySsl,
    OauthToken,
}

impl RecognizedField {
    /// All recognized fields in the order they are read.
    pub const ALL: [RecognizedField; 5] = [
        RecognizedField::Host,
        RecognizedField::Username,
        RecognizedField::Password,
        RecognizedField::VerifySsl,
        RecognizedField::OauthToken,
    ];

    /// Key used in config files.
    pub fn key(self) -> &'static str {
        match self {
            RecognizedField::Host => "host",
            RecognizedField::Username => "username",
            RecognizedField::Password => "password",
            RecognizedField::VerifySsl => "verify_ssl",
            RecognizedField::OauthToken => "oauth_token",
        }
    }

    /// Name of the matching direct parameter.
    pub fn param_name(self) -> &'static str {
        match self {
            RecognizedField::Host => "host",
            RecognizedField::Username => "username",
            RecognizedField::Password => "password",
            RecognizedField::VerifySsl => "verify_certs",
            RecognizedField::OauthToken => "oauth_token",
        }
    }
}

impl fmt::Display for RecognizedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Final connection settings after every source has been applied.
///
/// `password` and `oauth_token` are wrapped in [`SecretString`] so they never
/// show up in `Debug` output or log events.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Controller host, carried through exactly as configured.
    pub host: String,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Whether TLS certificates are verified. Default: true.
    pub verify_ssl: bool,
    pub oauth_token: Option<SecretString>,
}

/// Partial settings contributed by a single source.
///
/// `None` means "this source does not mention the field" and never
/// overwrites an earlier value.
#[derive(Debug, Default)]
pub struct ConfigLayer {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub verify_ssl: Option<bool>,
    pub oauth_token: Option<SecretString>,
}

impl ConfigLayer {
    /// Fields this layer sets, in [`RecognizedField::ALL`] order.
    pub fn fields(&self) -> Vec<RecognizedField> {
        RecognizedField::ALL
            .into_iter()
            .filter(|field| match field {
                RecognizedField::Host => self.host.is_some(),
                RecognizedField::Username => self.username.is_some(),
                RecognizedField::Password => self.password.is_some(),
                RecognizedField::VerifySsl => self.verify_ssl.is_some(),
                RecognizedField::OauthToken => self.oauth_token.is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

/// Values supplied directly by the caller (command line or environment).
///
/// These take precedence over every config file.
#[derive(Debug, Default)]
pub struct DirectParams {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Explicit `false` is a real choice, distinct from "not provided".
    pub verify_certs: Option<bool>,
    pub oauth_token: Option<SecretString>,
    /// Config file named by the caller; loaded after all discovered files.
    pub config_file: Option<PathBuf>,
}

/// Where an implicitly discovered candidate file comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    /// `/etc/tower/tower_cli.cfg`
    System,
    /// `~/.tower_cli.cfg`
    Home,
    /// `.tower_cli.cfg` in the working directory or one of its ancestors
    Ancestor,
    /// `tower_cli.cfg` in the working directory
    WorkingDirectory,
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateOrigin::System => "system",
            CandidateOrigin::Home => "home",
            CandidateOrigin::Ancestor => "ancestor",
            CandidateOrigin::WorkingDirectory => "working-directory",
        };
        f.write_str(label)
    }
}

/// A config file path produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCandidate {
    pub path: PathBuf,
    pub origin: CandidateOrigin,
}

/// Outcome of a successful resolution pass.
#[derive(Debug)]
pub struct Resolution {
    pub config: ResolvedConfig,
    /// Direct parameters given alongside an explicit config file.
    pub duplicated_params: Vec<RecognizedField>,
    /// Files whose settings were applied, in application order.
    pub loaded_files: Vec<PathBuf>,
}
