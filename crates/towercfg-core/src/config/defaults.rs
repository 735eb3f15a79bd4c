//! Built-in defaults and well-known config locations.

use crate::config::types::ResolvedConfig;

/// Host used when no source names one.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Base name of every config file.
pub const CONFIG_NAME: &str = "tower_cli.cfg";

/// System-wide config file, lowest precedence.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/tower/tower_cli.cfg";

/// Dotted file name used in the home directory and in ancestor directories.
pub fn hidden_config_name() -> String {
    format!(".{}", CONFIG_NAME)
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            username: None,
            password: None,
            verify_ssl: true,
            oauth_token: None,
        }
    }
}
