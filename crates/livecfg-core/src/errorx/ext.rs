use std::error::Error as StdError;

use super::error::{Error, Result};

/// Lifts foreign errors into [`Error`] at the call site.
pub trait ResultExt<T> {
    /// Wraps the error, if any, with [`Error::wrap`]. `Ok` passes through.
    fn wrap_err(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn wrap_err(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::ParseIntError;

    fn parse(raw: &str) -> Result<u16> {
        raw.parse::<u16>().wrap_err()
    }

    #[test]
    fn test_ok_passes_through() {
        assert_eq!(parse("8080").unwrap(), 8080);
    }

    #[test]
    fn test_err_is_wrapped() {
        let err = parse("port").unwrap_err();
        assert!(err.cause().unwrap().downcast_ref::<ParseIntError>().is_some());
        assert_eq!(err.message(), "invalid digit found in string");
        assert!(err.stack().iter().any(|f| f.name.contains("parse")));
    }
}
