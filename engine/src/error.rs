//! Error types for the FileDB engine.

use crate::RecordId;
use thiserror::Error;

/// All possible errors from the FileDB engine.
///
/// `NotFound` is the error callers are expected to handle. `IdsExhausted`
/// guards the id counter; the other variants carry filesystem and parse
/// failures through unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("record not found: {0}")]
    NotFound(RecordId),

    #[error("id counter exhausted at {0}")]
    IdsExhausted(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed store file: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this is the store's own "no such record" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::NotFound("7".into());
        assert_eq!(err.to_string(), "record not found: 7");
        assert!(err.is_not_found());

        let err = Error::IdsExhausted(u64::MAX);
        assert_eq!(err.to_string(), "id counter exhausted at 18446744073709551615");
        assert!(!err.is_not_found());

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "io error: gone");
        assert!(!err.is_not_found());
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("malformed store file:"));
    }
}
