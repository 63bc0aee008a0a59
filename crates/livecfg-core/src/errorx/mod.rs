//! Error values with codes, type tags, causal chains and captured stacks.
//!
//! # Example
//!
//! ```rust
//! use livecfg_core::coded;
//! use livecfg_core::errorx::{Error, ErrorType};
//!
//! let err = coded!(1001, "invalid secret {}", "abc");
//! assert_eq!(err.code(), 1001);
//! assert_eq!(err.to_string(), "invalid secret abc");
//!
//! let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
//! let wrapped = Error::wrap(io);
//! assert!(wrapped.cause().is_some());
//!
//! let typed = Error::with_type(ErrorType::Conflict, "stale revision");
//! assert_eq!(typed.error_type(), Some(&ErrorType::Conflict));
//! ```

mod error;
mod ext;
mod stack;

pub use error::{Cause, Error, ErrorType, Result};
pub use ext::ResultExt;
pub use stack::{Frame, Stack};

/// Builds an [`Error`] with a numeric code and a `format!`-rendered message.
///
/// ```rust
/// let err = livecfg_core::coded!(42, "bad value: {}", 7);
/// assert_eq!(err.message(), "bad value: 7");
/// ```
#[macro_export]
macro_rules! coded {
    ($code:expr, $($arg:tt)+) => {
        $crate::errorx::Error::with_code($code, ::std::format!($($arg)+))
    };
}
