//! Error types for bf-tabular

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Failures raised while encoding or decoding a table
#[derive(Error, Debug)]
pub enum CodecError {
    /// Arrow array or CSV failure
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet reader/writer failure
    #[error("Parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),

    /// XLSX writer failure
    #[error("Spreadsheet write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// XLSX reader failure
    #[error("Spreadsheet read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    /// Payload is structurally unusable (empty, no header, too wide, ...)
    #[error("Invalid table data: {0}")]
    Invalid(String),

    /// Unknown format name or extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::Invalid("empty payload".into());
        assert_eq!(err.to_string(), "Invalid table data: empty payload");

        let err = CodecError::UnsupportedFormat("json".into());
        assert_eq!(err.to_string(), "Unsupported format: json");
    }
}
