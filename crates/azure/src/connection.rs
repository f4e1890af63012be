//! Connection string handling
//!
//! Turns an Azure Storage connection string into a `ClientBuilder`. Account
//! key, SAS and development-storage forms are accepted; an explicit
//! `BlobEndpoint` or an `EndpointSuffix` selects a custom location.

use azure_storage::{CloudLocation, ConnectionString, EndpointProtocol};
use azure_storage_blobs::prelude::ClientBuilder;

use bf_core::{StoreError, StoreResult};

/// Build a client builder from a connection string
pub fn client_builder(connection_string: &str) -> StoreResult<ClientBuilder> {
    let parsed = ConnectionString::new(connection_string).map_err(invalid)?;

    if parsed.use_development_storage == Some(true) {
        return Ok(ClientBuilder::emulator());
    }

    let account = account_name(&parsed)?;
    let credentials = parsed.storage_credentials().map_err(invalid)?;

    let builder = match blob_endpoint(&parsed, account) {
        Some(uri) => ClientBuilder::with_location(
            CloudLocation::Custom {
                account: account.to_string(),
                uri,
            },
            credentials,
        ),
        None => ClientBuilder::new(account, credentials),
    };
    Ok(builder)
}

fn account_name<'a>(parsed: &ConnectionString<'a>) -> StoreResult<&'a str> {
    parsed
        .account_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| StoreError::InvalidConnectionString("missing AccountName".into()))
}

/// Blob service endpoint, if the connection string moves it off the default
fn blob_endpoint(parsed: &ConnectionString<'_>, account: &str) -> Option<String> {
    if let Some(endpoint) = parsed.blob_endpoint {
        return Some(endpoint.trim_end_matches('/').to_string());
    }
    parsed
        .endpoint_suffix
        .filter(|suffix| *suffix != "core.windows.net")
        .map(|suffix| {
            let protocol = parsed
                .default_endpoints_protocol
                .as_ref()
                .unwrap_or(&EndpointProtocol::Https);
            format!("{protocol}://{account}.blob.{suffix}")
        })
}

fn invalid(err: azure_core::Error) -> StoreError {
    StoreError::InvalidConnectionString(err.to_string())
}
