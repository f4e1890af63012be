//! Azure Blob Storage client implementation
//!
//! Wraps azure_storage_blobs and implements the storage traits from bf-core.
//! The SDK is async; each call is driven to completion on a private
//! current-thread runtime shared by every handle from one connector.

use std::sync::Arc;

use azure_core::request_options::IfMatchCondition;
use azure_storage_blobs::prelude::{BlobServiceClient, ContainerClient};
use futures::StreamExt;
use tokio::runtime::Runtime;
use tracing::debug;

use bf_core::{
    AccountStore, BlobInfo, Connector, ContainerStore, ListFilter, StoreError, StoreResult,
    UploadOptions,
};

use crate::connection::client_builder;
use crate::error::store_error;

/// Connector producing Azure account handles
#[derive(Clone)]
pub struct AzureConnector {
    runtime: Arc<Runtime>,
}

impl AzureConnector {
    /// Create a connector with its own runtime
    pub fn new() -> StoreResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Service(format!("failed to start runtime: {e}")))?;
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }
}

impl Connector for AzureConnector {
    fn connect(&self, connection_string: &str) -> StoreResult<Box<dyn AccountStore>> {
        let service = client_builder(connection_string)?.blob_service_client();
        debug!("Built blob service client");
        Ok(Box::new(AzureAccount {
            runtime: Arc::clone(&self.runtime),
            service,
        }))
    }
}

/// Account handle backed by a `BlobServiceClient`
pub struct AzureAccount {
    runtime: Arc<Runtime>,
    service: BlobServiceClient,
}

impl AzureAccount {
    /// Get the underlying service client
    pub fn inner(&self) -> &BlobServiceClient {
        &self.service
    }
}

impl AccountStore for AzureAccount {
    fn list_containers(&self) -> StoreResult<Vec<String>> {
        self.runtime.block_on(async {
            let mut stream = self.service.list_containers().into_stream();
            let mut names = Vec::new();
            while let Some(page) = stream.next().await {
                let page = page.map_err(store_error)?;
                names.extend(page.containers.into_iter().map(|c| c.name));
            }
            Ok(names)
        })
    }

    fn create_container(&self, name: &str) -> StoreResult<()> {
        self.runtime.block_on(async {
            self.service
                .container_client(name)
                .create()
                .await
                .map_err(store_error)?;
            Ok(())
        })
    }

    fn delete_container(&self, name: &str) -> StoreResult<()> {
        self.runtime.block_on(async {
            self.service
                .container_client(name)
                .delete()
                .await
                .map_err(store_error)?;
            Ok(())
        })
    }

    fn container(&self, name: &str) -> StoreResult<Box<dyn ContainerStore>> {
        Ok(Box::new(AzureContainer {
            runtime: Arc::clone(&self.runtime),
            client: self.service.container_client(name),
        }))
    }
}

/// Container handle backed by a `ContainerClient`
pub struct AzureContainer {
    runtime: Arc<Runtime>,
    client: ContainerClient,
}

impl ContainerStore for AzureContainer {
    fn list_blobs(&self, filter: &ListFilter) -> StoreResult<Vec<BlobInfo>> {
        self.runtime.block_on(async {
            let mut request = self.client.list_blobs();
            if let Some(prefix) = &filter.prefix {
                request = request.prefix(prefix.clone());
            }

            let mut stream = request.into_stream();
            let mut blobs = Vec::new();
            while let Some(page) = stream.next().await {
                let page = page.map_err(store_error)?;
                for blob in page.blobs.blobs() {
                    // Suffix is not a service-side filter
                    if !filter.matches(&blob.name) {
                        continue;
                    }
                    let mut info =
                        BlobInfo::new(blob.name.as_str()).with_size(blob.properties.content_length);
                    if let Ok(ts) =
                        jiff::Timestamp::from_second(blob.properties.last_modified.unix_timestamp())
                    {
                        info = info.with_last_modified(ts);
                    }
                    blobs.push(info);
                }
            }
            Ok(blobs)
        })
    }

    fn upload_blob(&self, name: &str, data: Vec<u8>, options: &UploadOptions) -> StoreResult<()> {
        self.runtime.block_on(async {
            let mut request = self.client.blob_client(name).put_block_blob(data);
            if let Some(content_type) = &options.content_type {
                request = request.content_type(content_type.clone());
            }
            if !options.overwrite {
                request = request.if_match(IfMatchCondition::NotMatch("*".to_string()));
            }
            request.await.map_err(store_error)?;
            Ok(())
        })
    }

    fn download_blob(&self, name: &str) -> StoreResult<Vec<u8>> {
        self.runtime.block_on(async {
            self.client
                .blob_client(name)
                .get_content()
                .await
                .map_err(store_error)
        })
    }

    fn delete_blob(&self, name: &str) -> StoreResult<()> {
        self.runtime.block_on(async {
            self.client
                .blob_client(name)
                .delete()
                .await
                .map_err(store_error)?;
            Ok(())
        })
    }
}
