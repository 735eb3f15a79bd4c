use crate::config::types::RecognizedField;
use std::error::Error;
use std::path::PathBuf;

/// Base trait for all application errors
pub trait TowercfgError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type TowercfgResult<T> = Result<T, Box<dyn TowercfgError>>;

/// A config file that could not be turned into settings.
///
/// Every variant carries the offending path so the message can be shown
/// to the user verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("Config file '{}' is not a regular file", .path.display())]
    NotAFile { path: PathBuf },

    #[error("Config file '{}' cannot be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file '{}' is not properly formatted: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Config file '{}' has an invalid value for '{field}': {message}", .path.display())]
    InvalidValue {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigFileError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigFileError::NotFound { path }
            | ConfigFileError::NotAFile { path }
            | ConfigFileError::Unreadable { path, .. }
            | ConfigFileError::Malformed { path, .. }
            | ConfigFileError::InvalidValue { path, .. } => path,
        }
    }
}

impl TowercfgError for ConfigFileError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigFileError::NotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigFileError::NotAFile { .. } => "CONFIG_NOT_A_FILE",
            ConfigFileError::Unreadable { .. } => "CONFIG_IO_ERROR",
            ConfigFileError::Malformed { .. } => "CONFIG_PARSE_ERROR",
            ConfigFileError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            ConfigFileError::NotFound { .. }
            | ConfigFileError::NotAFile { .. }
            | ConfigFileError::Malformed { .. }
            | ConfigFileError::InvalidValue { .. } => true,

            ConfigFileError::Unreadable { .. } => false,
        }
    }
}

/// Failure of a whole resolution pass.
///
/// The variant records whether the broken file was named by the caller or
/// found by discovery. Both are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Failed to load the specified config file: {source}")]
    ExplicitFile {
        #[source]
        source: ConfigFileError,
        /// Direct parameters that were given alongside the file.
        duplicated_params: Vec<RecognizedField>,
    },

    #[error("Failed to load a discovered config file: {source}")]
    ImplicitFile {
        #[source]
        source: ConfigFileError,
    },
}

impl ResolveError {
    /// The underlying file error, regardless of how the file was found.
    pub fn file_error(&self) -> &ConfigFileError {
        match self {
            ResolveError::ExplicitFile { source, .. } | ResolveError::ImplicitFile { source } => {
                source
            }
        }
    }

    /// Duplicated-parameter notice, which still applies when the explicit
    /// file itself failed to load.
    pub fn warning(&self) -> Option<String> {
        match self {
            ResolveError::ExplicitFile {
                duplicated_params, ..
            } => crate::config::resolver::duplicate_params_warning(duplicated_params),
            ResolveError::ImplicitFile { .. } => None,
        }
    }
}

impl TowercfgError for ResolveError {
    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::ExplicitFile { .. } => "EXPLICIT_CONFIG_FILE_ERROR",
            ResolveError::ImplicitFile { .. } => "IMPLICIT_CONFIG_FILE_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        self.file_error().is_user_error()
    }
}
