//! Storage capability traits
//!
//! These traits define the interface the facade needs from a storage
//! backend. They allow the facade to be decoupled from any vendor SDK and are
//! mocked in tests.
//!
//! Calls are blocking: each returns only once the backend round trip has
//! completed or failed.

use serde::Serialize;

use crate::error::StoreResult;

/// Metadata for one blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobInfo {
    /// Blob name within its container
    pub name: String,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,
}

impl BlobInfo {
    /// Blob with a name only
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes: None,
            last_modified: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size_bytes = Some(size);
        self
    }

    pub fn with_last_modified(mut self, ts: jiff::Timestamp) -> Self {
        self.last_modified = Some(ts);
        self
    }
}

/// Criteria for listing blobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only names starting with this
    pub prefix: Option<String>,

    /// Only names ending with this
    pub suffix: Option<String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Whether a blob name passes both criteria
    pub fn matches(&self, name: &str) -> bool {
        self.prefix.as_deref().is_none_or(|p| name.starts_with(p))
            && self.suffix.as_deref().is_none_or(|s| name.ends_with(s))
    }
}

/// Options for uploads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Replace an existing blob instead of failing with a conflict
    pub overwrite: bool,

    /// Content type stored with the blob
    pub content_type: Option<String>,
}

/// Builds an account handle from a connection string
#[cfg_attr(test, mockall::automock)]
pub trait Connector: Send + Sync {
    fn connect(&self, connection_string: &str) -> StoreResult<Box<dyn AccountStore>>;
}

/// Account-level operations
#[cfg_attr(test, mockall::automock)]
pub trait AccountStore: Send + Sync {
    /// List container names
    fn list_containers(&self) -> StoreResult<Vec<String>>;

    /// Create a container; an existing one is a `Conflict`
    fn create_container(&self, name: &str) -> StoreResult<()>;

    /// Delete a container and every blob in it
    fn delete_container(&self, name: &str) -> StoreResult<()>;

    /// Handle scoped to one container
    ///
    /// The handle is a lazy reference: the container need not exist yet.
    fn container(&self, name: &str) -> StoreResult<Box<dyn ContainerStore>>;
}

/// Container-level operations
#[cfg_attr(test, mockall::automock)]
pub trait ContainerStore: Send + Sync {
    /// List blobs matching `filter`, in backend order
    fn list_blobs(&self, filter: &ListFilter) -> StoreResult<Vec<BlobInfo>>;

    /// Write a blob
    fn upload_blob(&self, name: &str, data: Vec<u8>, options: &UploadOptions) -> StoreResult<()>;

    /// Read a blob's full content
    fn download_blob(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Remove a blob
    fn delete_blob(&self, name: &str) -> StoreResult<()>;
}
