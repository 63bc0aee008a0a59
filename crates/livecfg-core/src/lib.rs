//! # livecfg Core
//!
//! Building blocks shared by every livecfg crate.
//!
//! - [`errorx`]: error values carrying a message, an optional numeric code, an
//!   optional type tag, an optional cause and the stack at construction.
//! - [`config`]: live configuration holders. Many readers, occasional writers
//!   and a single change observer.
//!
//! ## Example
//!
//! ```rust
//! use livecfg_core::prelude::*;
//!
//! #[derive(Debug, Clone, Default, ZeroValue)]
//! struct Config {
//!     secret: String,
//! }
//!
//! fn validate(conf: &Config) -> Result<()> {
//!     if conf.secret.len() < 8 {
//!         return Err(coded!(1001, "invalid secret {}", conf.secret));
//!     }
//!     Ok(())
//! }
//!
//! let conf = config::local::<Config>()
//!     .watch()
//!     .init_data(Config { secret: "short".into() });
//!
//! let err = validate(&conf.get()).unwrap_err();
//! assert_eq!(err.code(), 1001);
//! assert_eq!(err.to_string(), "invalid secret short");
//! ```

// Derive output names `::livecfg_core`, which must also resolve in this crate.
extern crate self as livecfg_core;

pub mod config;
pub mod errorx;

pub use config::{
    CancelHandle, LocalManager, Manager, ManagerExt, Observer, SharedManager, ZeroValue,
};
pub use errorx::{Error, ErrorType, Result, ResultExt};

/// Commonly used items.
pub mod prelude {
    pub use crate::coded;
    pub use crate::config::{
        self, CancelHandle, LocalManager, Manager, ManagerExt, SharedManager, ZeroValue,
    };
    pub use crate::errorx::{Error, ErrorType, Result, ResultExt};
}
