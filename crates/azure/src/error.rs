//! Mapping of Azure SDK errors onto `StoreError`

use azure_core::StatusCode;
use azure_core::error::ErrorKind;

use bf_core::StoreError;

/// Classify an SDK error, keeping its description
pub fn store_error(err: azure_core::Error) -> StoreError {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::HttpResponse { status, .. } => match status {
            StatusCode::NotFound => StoreError::NotFound(message),
            StatusCode::Conflict | StatusCode::PreconditionFailed => StoreError::Conflict(message),
            StatusCode::Unauthorized | StatusCode::Forbidden => StoreError::Auth(message),
            _ => StoreError::Service(message),
        },
        ErrorKind::Io => StoreError::Network(message),
        ErrorKind::Credential => StoreError::Auth(message),
        _ => StoreError::Service(message),
    }
}
