//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during settings loading and validation.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// File not found at the specified path.
    #[error("Settings file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file extension has no enabled format feature.
    #[error("Unsupported or disabled settings file format: .{0}")]
    UnsupportedFormat(String),

    /// A source could not be read or did not match the schema.
    #[error("Failed to extract settings: {0}")]
    Extract(Box<figment::Error>),

    /// Invalid settings value.
    #[error("Invalid settings: {message}")]
    Validation { message: String },

    /// A per-target filter names an unknown level.
    #[error("Invalid log level `{level}` for target `{target}`")]
    InvalidLevel { target: String, level: String },
}

impl SettingsError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for SettingsError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

impl From<SettingsError> for livecfg_core::Error {
    fn from(err: SettingsError) -> Self {
        livecfg_core::Error::wrap(err)
    }
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
