//! Runtime settings for livecfg applications.
//!
//! These settings configure the runtime itself (logging, notification
//! queues). Application values live in a [`Manager`](livecfg_core::Manager).

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{SettingsError, SettingsResult};
pub use loader::{Profile, SettingsLoader, load_settings, load_settings_from_file};
pub use schema::{
    LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, NotifyConfig, RuntimeSettings,
    SpanEventConfig,
};
pub use validation::validate_settings;
