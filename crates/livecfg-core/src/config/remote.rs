//! Holders backed by an external configuration service.
//!
//! No backend exists yet. [`remote`] fails immediately so callers never get a
//! holder that silently serves stale or empty data.

use tracing::warn;

use super::SharedManager;
use crate::errorx::{Error, ErrorType, Result};

/// Code carried by the error [`remote`] returns.
pub const CODE_REMOTE_UNIMPLEMENTED: i32 = 5001;

/// Creates a holder synchronized with the service at `endpoint`.
///
/// Always fails with [`ErrorType::Unavailable`] and
/// [`CODE_REMOTE_UNIMPLEMENTED`].
pub fn remote<T>(endpoint: impl Into<String>) -> Result<SharedManager<T>>
where
    T: Clone + Send + Sync + 'static,
{
    let endpoint = endpoint.into();
    warn!(endpoint = %endpoint, "Remote configuration holder requested");
    Err(Error::with_details(
        CODE_REMOTE_UNIMPLEMENTED,
        ErrorType::Unavailable,
        format!("remote configuration holder is not implemented (endpoint: {endpoint})"),
    ))
}
