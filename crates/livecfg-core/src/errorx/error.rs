//! The [`Error`] value and its classification tags.

use std::error::Error as StdError;
use std::fmt;
use std::iter;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::stack::Stack;

/// Shared handle to the error an [`Error`] wraps.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Result type whose failure channel is an [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

// =============================================================================
// Error Types
// =============================================================================

/// Classification tag carried by an [`Error`].
///
/// The set is open: [`ErrorType::Custom`] holds any tag not listed here.
/// Tags serialize as their plain string form (`"not_found"`, `"timeout"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorType {
    /// The requested entity does not exist.
    NotFound,
    /// The operation did not finish in time.
    Timeout,
    /// The input was rejected.
    Invalid,
    /// The operation collided with a concurrent change.
    Conflict,
    /// The caller is not allowed to perform the operation.
    PermissionDenied,
    /// An unexpected internal failure.
    Internal,
    /// A dependency could not be reached.
    Unavailable,
    /// Caller-defined tag.
    ///
    /// Build it with [`ErrorType::custom`]; a `Custom` holding a built-in tag
    /// such as `"timeout"` reads back as the built-in variant.
    Custom(String),
}

impl ErrorType {
    /// Creates a tag from a string, mapping built-in tags to their variant.
    pub fn custom(tag: impl Into<String>) -> Self {
        Self::from(tag.into())
    }

    /// Returns the tag as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotFound => "not_found",
            Self::Timeout => "timeout",
            Self::Invalid => "invalid",
            Self::Conflict => "conflict",
            Self::PermissionDenied => "permission_denied",
            Self::Internal => "internal_error",
            Self::Unavailable => "unavailable",
            Self::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorType {
    fn from(tag: &str) -> Self {
        match tag {
            "not_found" => Self::NotFound,
            "timeout" => Self::Timeout,
            "invalid" => Self::Invalid,
            "conflict" => Self::Conflict,
            "permission_denied" => Self::PermissionDenied,
            "internal_error" => Self::Internal,
            "unavailable" => Self::Unavailable,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ErrorType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<ErrorType> for String {
    fn from(kind: ErrorType) -> Self {
        match kind {
            ErrorType::Custom(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

// =============================================================================
// Error
// =============================================================================

/// An error with a numeric code, a type tag, an optional cause and the call
/// stack captured when it was built.
///
/// All fields are fixed at construction. Cloning is cheap and shares the same
/// record, stack included.
///
/// The textual representation (`Display`) is the message alone; the cause is
/// reachable through [`Error::cause`] or [`std::error::Error::source`].
#[derive(Clone)]
pub struct Error {
    inner: Arc<Inner>,
}

struct Inner {
    message: String,
    code: i32,
    kind: Option<ErrorType>,
    cause: Option<Cause>,
    stack: Stack,
}

impl Error {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(message.into(), 0, None, None)
    }

    /// Creates an error with a numeric code.
    ///
    /// Use [`coded!`](crate::coded) to render the message from a format string.
    pub fn with_code(code: i32, message: impl Into<String>) -> Self {
        Self::build(message.into(), code, None, None)
    }

    /// Creates an error with a type tag.
    pub fn with_type(kind: ErrorType, message: impl Into<String>) -> Self {
        Self::build(message.into(), 0, Some(kind), None)
    }

    /// Creates an error with both a numeric code and a type tag.
    pub fn with_details(code: i32, kind: ErrorType, message: impl Into<String>) -> Self {
        Self::build(message.into(), code, Some(kind), None)
    }

    /// Wraps `err`, keeping its message and recording it as the cause.
    ///
    /// The stack is captured here, at the wrap site; the wrapped error keeps
    /// its own. Code and type are left unset.
    pub fn wrap<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = err.to_string();
        Self::build(message, 0, None, Some(Arc::new(err)))
    }

    /// Wraps `err` if present; `None` stays `None`.
    pub fn wrap_opt<E>(err: Option<E>) -> Option<Self>
    where
        E: StdError + Send + Sync + 'static,
    {
        match err {
            Some(err) => Some(Self::wrap(err)),
            None => None,
        }
    }

    fn build(message: String, code: i32, kind: Option<ErrorType>, cause: Option<Cause>) -> Self {
        Self {
            inner: Arc::new(Inner {
                message,
                code,
                kind,
                cause,
                stack: Stack::capture(),
            }),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The numeric code, `0` when unset.
    pub fn code(&self) -> i32 {
        self.inner.code
    }

    /// The type tag, if one was set.
    pub fn error_type(&self) -> Option<&ErrorType> {
        self.inner.kind.as_ref()
    }

    /// The directly wrapped error, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.cause.as_deref()
    }

    /// The stack captured at construction.
    pub fn stack(&self) -> &Stack {
        &self.inner.stack
    }

    /// Iterates the causal chain, starting with this error.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        iter::successors(Some(self as &(dyn StdError + 'static)), |&err| err.source())
    }

    /// The innermost error of the causal chain (this error if it has no cause).
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        self.chain()
            .last()
            .unwrap_or(self as &(dyn StdError + 'static))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Error");
        debug.field("message", &self.inner.message);
        if self.inner.code != 0 {
            debug.field("code", &self.inner.code);
        }
        if let Some(kind) = &self.inner.kind {
            debug.field("type", kind);
        }
        if let Some(cause) = &self.inner.cause {
            debug.field("cause", cause);
        }
        debug.field("frames", &self.inner.stack.len()).finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[inline(never)]
    fn make_original() -> Error {
        Error::new("disk offline")
    }

    #[test]
    fn test_new_carries_message_only() {
        let err = Error::new("boom");
        assert_eq!(err.message(), "boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.code(), 0);
        assert!(err.error_type().is_none());
        assert!(err.cause().is_none());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_with_code() {
        let err = Error::with_code(404, "no such key");
        assert_eq!(err.code(), 404);
        assert_eq!(err.message(), "no such key");
        assert!(err.error_type().is_none());
    }

    #[test]
    fn test_coded_renders_format_arguments() {
        let err = crate::coded!(1001, "invalid secret {}", "abc");
        assert_eq!(err.message(), "invalid secret abc");
        assert_eq!(err.code(), 1001);
    }

    #[test]
    fn test_with_details_sets_code_and_type() {
        let err = Error::with_details(503, ErrorType::Unavailable, "store down");
        assert_eq!(err.code(), 503);
        assert_eq!(err.error_type(), Some(&ErrorType::Unavailable));
    }

    #[test]
    fn test_wrap_absent_is_absent() {
        assert!(Error::wrap_opt(None::<io::Error>).is_none());
    }

    #[test]
    fn test_wrap_keeps_cause_and_message() {
        let err = Error::wrap(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));

        assert_eq!(err.message(), "read timed out");
        assert_eq!(err.code(), 0);
        let cause = err.cause().expect("cause is set");
        let io_err = cause.downcast_ref::<io::Error>().expect("cause keeps its type");
        assert_eq!(io_err.kind(), io::ErrorKind::TimedOut);

        let source = err.source().expect("source mirrors cause");
        assert!(source.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_wrap_opt_some() {
        let err = Error::wrap_opt(Some(make_original())).expect("present error wraps");
        let inner = err.cause().and_then(|c| c.downcast_ref::<Error>()).unwrap();
        assert_eq!(inner.message(), "disk offline");
        assert_eq!(err.message(), "disk offline");
    }

    #[test]
    fn test_stack_starts_at_caller() {
        let err = Error::new("here");
        let first = err.stack().frames().first().expect("debug builds resolve symbols");
        assert!(
            first.name.contains("test_stack_starts_at_caller"),
            "unexpected first frame: {}",
            first.name
        );
        assert!(err.stack().iter().all(|f| !f.name.contains("Stack::capture")));
    }

    #[test]
    fn test_wrap_captures_its_own_stack() {
        let original = make_original();
        assert!(original.stack().iter().any(|f| f.name.contains("make_original")));

        let wrapped = Error::wrap(original.clone());
        assert!(!wrapped.stack().iter().any(|f| f.name.contains("make_original")));
        assert_ne!(original.stack(), wrapped.stack());
    }

    #[test]
    fn test_chain_and_root_cause() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = Error::wrap(Error::wrap(io_err));

        assert_eq!(err.chain().count(), 3);
        let messages: Vec<_> = err.chain().map(|e| e.to_string()).collect();
        assert_eq!(messages, ["missing", "missing", "missing"]);
        let root = err.root_cause();
        assert!(root.downcast_ref::<io::Error>().is_some());
        assert_eq!(root.to_string(), "missing");
    }

    #[test]
    fn test_clone_shares_record() {
        let err = Error::with_code(7, "shared");
        let copy = err.clone();
        assert_eq!(copy.code(), 7);
        assert_eq!(copy.stack(), err.stack());
    }

    #[test]
    fn test_error_type_tags() {
        assert_eq!(ErrorType::PermissionDenied.as_str(), "permission_denied");
        assert_eq!(ErrorType::Internal.to_string(), "internal_error");
        assert_eq!(ErrorType::from("timeout"), ErrorType::Timeout);
        assert_eq!(
            ErrorType::from("rate_limited"),
            ErrorType::Custom("rate_limited".to_string())
        );
    }

    #[test]
    fn test_error_type_serde_uses_plain_tags() {
        let json = serde_json::to_string(&ErrorType::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");

        let custom: ErrorType = serde_json::from_str("\"quota\"").unwrap();
        assert_eq!(custom, ErrorType::Custom("quota".to_string()));
    }

    #[test]
    fn test_custom_tag_normalizes_builtin_names() {
        let kind = ErrorType::custom("timeout");
        assert_eq!(kind, ErrorType::Timeout);

        let json = serde_json::to_string(&kind).unwrap();
        let back: ErrorType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);

        assert_eq!(
            ErrorType::custom("rate_limited"),
            ErrorType::Custom("rate_limited".to_string())
        );
    }

    #[test]
    fn test_debug_omits_unset_fields() {
        let rendered = format!("{:?}", Error::new("plain"));
        assert!(rendered.contains("plain"));
        assert!(!rendered.contains("code"));
        assert!(!rendered.contains("type"));
    }
}
