//! Config file loading and layer merging.
//!
//! A file is loaded all-or-nothing: it either yields a complete
//! [`ConfigLayer`] or a [`ConfigFileError`], never a partial layer.

use crate::config::parsing::{ParseStrategy, layer_from_mapping, parse_settings};
use crate::config::types::{ConfigLayer, ResolvedConfig};
use crate::errors::ConfigFileError;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load a config file that must exist.
///
/// Used for the explicitly named config file.
///
/// # Errors
///
/// Fails if the path does not exist, is not a regular file, cannot be read,
/// or is malformed under both the structured and legacy INI formats.
pub fn load_config_file(path: &Path) -> Result<ConfigLayer, ConfigFileError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigFileError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigFileError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_file() {
        return Err(ConfigFileError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    read_layer(path)
}

/// Load a discovered config file.
///
/// Returns `Ok(None)` when the path is missing or is a directory. Anything
/// else that exists must be a regular, well-formed file.
pub fn load_optional_config_file(path: &Path) -> Result<Option<ConfigLayer>, ConfigFileError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!(
                event = "core.config.file_skipped",
                path = %path.display(),
                reason = %e
            );
            return Ok(None);
        }
    };

    if metadata.is_dir() {
        debug!(
            event = "core.config.file_skipped",
            path = %path.display(),
            reason = "directory"
        );
        return Ok(None);
    }

    if !metadata.is_file() {
        return Err(ConfigFileError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    read_layer(path).map(Some)
}

fn read_layer(path: &Path) -> Result<ConfigLayer, ConfigFileError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigFileError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (mapping, strategy) =
        parse_settings(&content).map_err(|message| ConfigFileError::Malformed {
            path: path.to_path_buf(),
            message,
        })?;

    if strategy == ParseStrategy::LegacyIni {
        debug!(
            event = "core.config.legacy_ini_fallback",
            path = %path.display()
        );
    }

    let layer = layer_from_mapping(&mapping).map_err(|e| ConfigFileError::InvalidValue {
        path: path.to_path_buf(),
        field: e.field,
        message: e.message,
    })?;

    let fields: Vec<&str> = layer.fields().iter().map(|f| f.key()).collect();
    info!(
        event = "core.config.file_loaded",
        path = %path.display(),
        format = ?strategy,
        fields = ?fields
    );

    Ok(layer)
}

/// Apply a layer on top of a config, with the layer taking precedence.
///
/// Fields the layer does not set are left untouched.
pub fn merge_layer(base: ResolvedConfig, layer: ConfigLayer) -> ResolvedConfig {
    ResolvedConfig {
        host: layer.host.unwrap_or(base.host),
        username: layer.username.or(base.username),
        password: layer.password.or(base.password),
        verify_ssl: layer.verify_ssl.unwrap_or(base.verify_ssl),
        oauth_token: layer.oauth_token.or(base.oauth_token),
    }
}
