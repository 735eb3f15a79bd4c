use serde::Serialize;
use towercfg_core::ResolvedConfig;

use crate::host::normalize_host;

pub const REDACTED: &str = "********";

/// Resolved settings as printed by `show --json`. Secrets are masked.
#[derive(Serialize)]
pub struct ResolvedConfigOutput {
    pub host: String,
    pub username: Option<String>,
    pub password: Option<&'static str>,
    pub verify_ssl: bool,
    pub oauth_token: Option<&'static str>,
    pub loaded_files: Vec<String>,
    pub warnings: Vec<String>,
}

impl ResolvedConfigOutput {
    pub fn new(config: &ResolvedConfig, loaded_files: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            host: normalize_host(&config.host),
            username: config.username.clone(),
            password: config.password.as_ref().map(|_| REDACTED),
            verify_ssl: config.verify_ssl,
            oauth_token: config.oauth_token.as_ref().map(|_| REDACTED),
            loaded_files,
            warnings,
        }
    }
}

/// One config file entry as printed by `sources --json`.
#[derive(Serialize)]
pub struct SourceOutput {
    pub path: String,
    pub origin: String,
    pub state: &'static str,
}
