//! Settings validation utilities.

use super::error::{SettingsError, SettingsResult};
use super::schema::{LogLevel, LogOutput, LoggingConfig, NotifyConfig, RuntimeSettings};

/// Validates the entire settings tree.
pub fn validate_settings(settings: &RuntimeSettings) -> SettingsResult<()> {
    validate_logging(&settings.logging)?;
    validate_notify(&settings.notify)?;
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> SettingsResult<()> {
    for (target, level) in &logging.filters {
        if target.trim().is_empty() {
            return Err(SettingsError::validation("Filter target cannot be empty"));
        }
        if level.parse::<LogLevel>().is_err() {
            return Err(SettingsError::InvalidLevel {
                target: target.clone(),
                level: level.clone(),
            });
        }
    }

    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(SettingsError::validation(
            "File output requires `logging.file_path`",
        ));
    }

    Ok(())
}

fn validate_notify(notify: &NotifyConfig) -> SettingsResult<()> {
    if notify.queue_capacity == 0 {
        return Err(SettingsError::validation(
            "Notification queue capacity must be greater than 0",
        ));
    }
    Ok(())
}
