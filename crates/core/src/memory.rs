//! In-memory storage backend
//!
//! Behaves like a remote account for the operations the facade uses:
//! container handles are lazy, uploads without overwrite conflict on an
//! existing blob, and listings come back in name order. Clones share state.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{StoreError, StoreResult};
use crate::traits::{AccountStore, BlobInfo, Connector, ContainerStore, ListFilter, UploadOptions};

#[derive(Debug, Clone)]
struct StoredBlob {
    data: Vec<u8>,
    content_type: Option<String>,
    last_modified: jiff::Timestamp,
}

type Containers = BTreeMap<String, BTreeMap<String, StoredBlob>>;

/// Shared in-memory account
#[derive(Debug, Clone, Default)]
pub struct MemoryAccount {
    state: Arc<Mutex<Containers>>,
}

impl MemoryAccount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a container, builder style
    pub fn with_container(self, name: impl Into<String>) -> Self {
        self.lock().entry(name.into()).or_default();
        self
    }

    /// Content type a blob was stored with
    pub fn content_type(&self, container: &str, blob: &str) -> Option<String> {
        self.lock()
            .get(container)?
            .get(blob)?
            .content_type
            .clone()
    }

    fn lock(&self) -> MutexGuard<'_, Containers> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AccountStore for MemoryAccount {
    fn list_containers(&self) -> StoreResult<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }

    fn create_container(&self, name: &str) -> StoreResult<()> {
        let mut state = self.lock();
        if state.contains_key(name) {
            return Err(StoreError::Conflict(format!(
                "container '{name}' already exists"
            )));
        }
        state.insert(name.to_string(), BTreeMap::new());
        Ok(())
    }

    fn delete_container(&self, name: &str) -> StoreResult<()> {
        self.lock()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| container_not_found(name))
    }

    fn container(&self, name: &str) -> StoreResult<Box<dyn ContainerStore>> {
        Ok(Box::new(MemoryContainer {
            account: self.clone(),
            name: name.to_string(),
        }))
    }
}

/// Handle to one container of a `MemoryAccount`
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    account: MemoryAccount,
    name: String,
}

impl MemoryContainer {
    fn with_blobs<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, StoredBlob>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut state = self.account.lock();
        let blobs = state
            .get_mut(&self.name)
            .ok_or_else(|| container_not_found(&self.name))?;
        f(blobs)
    }
}

impl ContainerStore for MemoryContainer {
    fn list_blobs(&self, filter: &ListFilter) -> StoreResult<Vec<BlobInfo>> {
        self.with_blobs(|blobs| {
            Ok(blobs
                .iter()
                .filter(|(name, _)| filter.matches(name))
                .map(|(name, blob)| {
                    BlobInfo::new(name.as_str())
                        .with_size(blob.data.len() as u64)
                        .with_last_modified(blob.last_modified)
                })
                .collect())
        })
    }

    fn upload_blob(&self, name: &str, data: Vec<u8>, options: &UploadOptions) -> StoreResult<()> {
        self.with_blobs(|blobs| {
            if !options.overwrite && blobs.contains_key(name) {
                return Err(StoreError::Conflict(format!(
                    "blob '{name}' already exists"
                )));
            }
            blobs.insert(
                name.to_string(),
                StoredBlob {
                    data,
                    content_type: options.content_type.clone(),
                    last_modified: jiff::Timestamp::now(),
                },
            );
            Ok(())
        })
    }

    fn download_blob(&self, name: &str) -> StoreResult<Vec<u8>> {
        self.with_blobs(|blobs| {
            blobs
                .get(name)
                .map(|blob| blob.data.clone())
                .ok_or_else(|| blob_not_found(name))
        })
    }

    fn delete_blob(&self, name: &str) -> StoreResult<()> {
        self.with_blobs(|blobs| {
            blobs
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| blob_not_found(name))
        })
    }
}

/// Connector that hands out handles to one shared `MemoryAccount`
///
/// Any non-blank connection string is accepted.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    account: MemoryAccount,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(account: MemoryAccount) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &MemoryAccount {
        &self.account
    }
}

impl Connector for MemoryConnector {
    fn connect(&self, connection_string: &str) -> StoreResult<Box<dyn AccountStore>> {
        if connection_string.trim().is_empty() {
            return Err(StoreError::InvalidConnectionString(
                "connection string is blank".into(),
            ));
        }
        Ok(Box::new(self.account.clone()))
    }
}

fn container_not_found(name: &str) -> StoreError {
    StoreError::NotFound(format!("container '{name}' does not exist"))
}

fn blob_not_found(name: &str) -> StoreError {
    StoreError::NotFound(format!("blob '{name}' does not exist"))
}
