//! Precedence-ordered resolution of connection settings.
//!
//! Sources are applied lowest precedence first, each overwriting only the
//! fields it sets:
//! 1. Built-in defaults
//! 2. Discovered files (see [`discover_candidates`])
//! 3. The explicitly named config file
//! 4. Direct parameters

use crate::config::defaults::SYSTEM_CONFIG_PATH;
use crate::config::discovery::discover_candidates;
use crate::config::loading::{load_config_file, load_optional_config_file, merge_layer};
use crate::config::types::{
    ConfigCandidate, ConfigLayer, DirectParams, RecognizedField, Resolution, ResolvedConfig,
};
use crate::errors::ResolveError;
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resolves connection settings for one working directory and home.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cwd: PathBuf,
    home: Option<PathBuf>,
    system_config: PathBuf,
}

impl ConfigResolver {
    pub fn new(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
            system_config: PathBuf::from(SYSTEM_CONFIG_PATH),
        }
    }

    /// Resolver for the current process: current directory and user home.
    pub fn from_environment() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?, dirs::home_dir()))
    }

    /// Replace the system-wide config path.
    pub fn with_system_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_config = path.into();
        self
    }

    /// Implicit candidate files in application order.
    pub fn candidates(&self) -> Vec<ConfigCandidate> {
        discover_candidates(&self.cwd, self.home.as_deref(), &self.system_config)
    }

    /// Run a full resolution pass.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ImplicitFile`] if a discovered file exists but
    /// cannot be read or parsed, and [`ResolveError::ExplicitFile`] if the
    /// named config file is missing, not a file, unreadable, or malformed.
    pub fn resolve(&self, params: &DirectParams) -> Result<Resolution, ResolveError> {
        info!(
            event = "core.config.resolve_started",
            cwd = %self.cwd.display(),
            explicit_config = params.config_file.is_some()
        );

        let mut config = ResolvedConfig::default();
        let mut loaded_files = Vec::new();

        for candidate in self.candidates() {
            let layer = load_optional_config_file(&candidate.path)
                .map_err(|source| ResolveError::ImplicitFile { source })?;
            if let Some(layer) = layer {
                config = merge_layer(config, layer);
                loaded_files.push(candidate.path);
            }
        }

        let duplicated_params = duplicated_params(params);
        if let Some(explicit) = &params.config_file {
            if !duplicated_params.is_empty() {
                let names: Vec<&str> = duplicated_params.iter().map(|f| f.param_name()).collect();
                warn!(
                    event = "core.config.duplicate_params",
                    config_file = %explicit.display(),
                    params = ?names
                );
            }

            let layer =
                load_config_file(explicit).map_err(|source| ResolveError::ExplicitFile {
                    source,
                    duplicated_params: duplicated_params.clone(),
                })?;
            config = merge_layer(config, layer);
            loaded_files.push(explicit.clone());
        }

        config = merge_layer(config, direct_layer(params));

        info!(
            event = "core.config.resolve_completed",
            host = %config.host,
            verify_ssl = config.verify_ssl,
            files_loaded = loaded_files.len()
        );

        Ok(Resolution {
            config,
            duplicated_params,
            loaded_files,
        })
    }
}

/// Resolve settings for an explicit working directory and home.
///
/// See [`ConfigResolver::resolve`].
pub fn resolve(
    params: &DirectParams,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<Resolution, ResolveError> {
    ConfigResolver::new(cwd, home.map(Path::to_path_buf)).resolve(params)
}

/// Direct parameters given alongside an explicit config file, in field order.
///
/// Empty when no config file is named.
pub fn duplicated_params(params: &DirectParams) -> Vec<RecognizedField> {
    if params.config_file.is_none() {
        return Vec::new();
    }
    direct_layer(params).fields()
}

/// Human-readable notice for parameters given alongside a config file.
pub fn duplicate_params_warning(duplicated: &[RecognizedField]) -> Option<String> {
    if duplicated.is_empty() {
        return None;
    }
    let names: Vec<&str> = duplicated.iter().map(|f| f.param_name()).collect();
    Some(format!(
        "The parameter(s) {} were provided at the same time as config_file. \
         Precedence may be unstable, we suggest either using config file or params.",
        names.join(", ")
    ))
}

impl Resolution {
    /// Human-readable notice about parameters given alongside a config file.
    pub fn warning(&self) -> Option<String> {
        duplicate_params_warning(&self.duplicated_params)
    }

    /// Forward warnings to an optional sink. No sink means no-op.
    pub fn emit_warnings<F: FnMut(&str)>(&self, sink: Option<F>) {
        if let (Some(mut sink), Some(message)) = (sink, self.warning()) {
            sink(&message);
        }
    }
}

/// Direct parameters as a layer. Empty strings count as "not provided";
/// `verify_certs` counts whenever it is set, including `false`.
fn direct_layer(params: &DirectParams) -> ConfigLayer {
    ConfigLayer {
        host: non_empty(params.host.as_deref()).map(str::to_string),
        username: non_empty(params.username.as_deref()).map(str::to_string),
        password: non_empty_secret(params.password.as_ref()),
        verify_ssl: params.verify_certs,
        oauth_token: non_empty_secret(params.oauth_token.as_ref()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_secret(value: Option<&SecretString>) -> Option<SecretString> {
    value
        .map(|secret| secret.expose_secret())
        .filter(|v| !v.is_empty())
        .map(|v| SecretString::from(v.to_string()))
}
