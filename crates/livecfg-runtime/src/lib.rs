//! livecfg Runtime - process-level setup for livecfg applications.
//!
//! This crate provides:
//! - Logging initialization (`LoggingBuilder`, `init_from_config`)
//! - Layered runtime settings (`SettingsLoader`, `RuntimeSettings`)
//!
//! # Example
//!
//! ```ignore
//! use livecfg_runtime::{logging, settings::SettingsLoader};
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = SettingsLoader::new().load()?;
//!     logging::init_from_config(&settings.logging);
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod settings;

// Re-exports
pub use logging::{LoggingBuilder, SpanEvents, init_from_config};
pub use settings::{RuntimeSettings, SettingsError, SettingsLoader, SettingsResult};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
