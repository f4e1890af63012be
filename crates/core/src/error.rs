//! Error types for bf-core
//!
//! Facade calls fail in exactly three ways: configuration could not be
//! resolved, the storage handles could not be built, or a delegated
//! operation failed. The wrapped cause keeps its own classification so the
//! CLI can still pick a precise exit code.

use bf_tabular::CodecError;
use thiserror::Error;

/// Result type alias for bf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for storage backend calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure reported by a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection string could not be parsed or is incomplete
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Authentication or permission failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Container or blob does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists or a precondition failed
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Any other service-side failure
    #[error("{0}")]
    Service(String),
}

/// Cause of an operation failure
#[derive(Error, Debug)]
pub enum Failure {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Reading an upload stream failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Arguments rejected before anything was sent
    #[error("{0}")]
    InvalidInput(String),
}

/// Error types for facade operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required settings are missing or the settings file is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// The account or container handle could not be created
    #[error("Failed to connect to storage account: {0}")]
    Connection(#[source] StoreError),

    /// A delegated storage or codec call failed
    #[error("Error {verb}: {source}")]
    Operation {
        verb: &'static str,
        #[source]
        source: Failure,
    },
}

impl Error {
    pub(crate) fn operation(verb: &'static str, source: impl Into<Failure>) -> Self {
        Error::Operation {
            verb,
            source: source.into(),
        }
    }

    /// Replace the verb of an operation error, keeping its cause
    pub(crate) fn retag(self, verb: &'static str) -> Self {
        match self {
            Error::Operation { source, .. } => Error::Operation { verb, source },
            other => other,
        }
    }

    /// Verb of the failed operation, if this is an operation error
    pub fn verb(&self) -> Option<&'static str> {
        match self {
            Error::Operation { verb, .. } => Some(*verb),
            _ => None,
        }
    }

    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            Error::Connection(StoreError::InvalidConnectionString(_)) => 2,
            Error::Connection(StoreError::Auth(_)) => 4,
            Error::Connection(_) => 3,
            Error::Operation { source, .. } => match source {
                Failure::InvalidInput(_) => 2,
                Failure::Store(StoreError::Network(_)) => 3,
                Failure::Store(StoreError::Auth(_)) => 4,
                Failure::Store(StoreError::NotFound(_)) => 5,
                Failure::Store(StoreError::Conflict(_)) => 6,
                _ => 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(
            Error::Connection(StoreError::InvalidConnectionString("x".into())).exit_code(),
            2
        );
        assert_eq!(Error::Connection(StoreError::Network("x".into())).exit_code(), 3);
        assert_eq!(Error::Connection(StoreError::Auth("x".into())).exit_code(), 4);
        assert_eq!(
            Error::operation("downloading blob", StoreError::NotFound("x".into())).exit_code(),
            5
        );
        assert_eq!(
            Error::operation("uploading blob", StoreError::Conflict("x".into())).exit_code(),
            6
        );
        assert_eq!(
            Error::operation("converting CSV to table", CodecError::Invalid("x".into()))
                .exit_code(),
            1
        );
        assert_eq!(
            Error::operation("deleting blob", Failure::InvalidInput("x".into())).exit_code(),
            2
        );
    }

    #[test]
    fn test_operation_display() {
        let err = Error::operation(
            "downloading blob",
            StoreError::NotFound("blob 'a.csv' does not exist".into()),
        );
        assert_eq!(
            err.to_string(),
            "Error downloading blob: Not found: blob 'a.csv' does not exist"
        );
        assert_eq!(err.verb(), Some("downloading blob"));
    }

    #[test]
    fn test_connection_display() {
        let err = Error::Connection(StoreError::InvalidConnectionString("missing AccountName".into()));
        assert_eq!(
            err.to_string(),
            "Failed to connect to storage account: Invalid connection string: missing AccountName"
        );
        assert!(err.verb().is_none());
    }

    #[test]
    fn test_retag_keeps_cause() {
        let err = Error::operation("uploading blob", StoreError::Conflict("exists".into()))
            .retag("converting table to Parquet");
        assert_eq!(
            err.to_string(),
            "Error converting table to Parquet: Conflict: exists"
        );

        let config = Error::Config("missing".into()).retag("listing blobs");
        assert!(matches!(config, Error::Config(_)));
    }
}
