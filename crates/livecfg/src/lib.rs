//! # livecfg
//!
//! Live configuration for Rust services: a value that many threads read while
//! others replace it, with one change observer, plus error values that carry
//! a code, a type tag, a cause and the stack where they were made.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  get / update  ┌──────────────┐  on_change  ┌──────────┐
//! │  Your code   │───────────────▶│ LocalManager │────────────▶│ Observer │
//! └──────────────┘                └──────────────┘             └──────────┘
//!        │ Result<T, Error>
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │ errorx::Error { message, code, type, cause } │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! - **core**: holders, [`ZeroValue`](core::config::ZeroValue) and `errorx`
//! - **runtime**: logging and runtime settings
//!
//! ## Quick Start
//!
//! ```rust
//! use livecfg::prelude::*;
//!
//! #[derive(Debug, Clone, Default, ZeroValue)]
//! struct Config {
//!     secret: String,
//! }
//!
//! let conf = config::local::<Config>()
//!     .watch()
//!     .init_data(Config { secret: "hello world".into() });
//!
//! conf.update(Config { secret: "updated secret".into() }).unwrap();
//! assert_eq!(conf.get().secret, "updated secret");
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML runtime settings files (default)
//! - `yaml-config`: YAML runtime settings files
//! - `json-log`: JSON log output

pub use livecfg_core as core;
pub use livecfg_runtime as runtime;

pub use livecfg_core::{coded, config, errorx};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use livecfg::prelude::*;
/// ```
pub mod prelude {
    // Holders
    pub use livecfg_core::config::{
        self, CancelHandle, LocalManager, Manager, ManagerExt, SharedManager, ZeroValue,
    };

    // Errors
    pub use livecfg_core::coded;
    pub use livecfg_core::errorx::{Error, ErrorType, Result, ResultExt};

    // Runtime setup
    pub use livecfg_runtime::settings::{RuntimeSettings, SettingsLoader};
    pub use livecfg_runtime::{LoggingBuilder, init_from_config};
}
