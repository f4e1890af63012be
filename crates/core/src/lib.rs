//! bf-core: Core library for the bf blob storage client
//!
//! This crate provides the core functionality for bf, including:
//! - Configuration sources and credential resolution
//! - Storage traits the facade delegates to
//! - `BlobFacade`, the blob, container and table operations
//! - An in-memory backend for tests and embedding
//!
//! This crate is designed to be independent of any specific storage SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod credentials;
pub mod error;
pub mod facade;
pub mod memory;
pub mod payload;
pub mod traits;

pub use config::{
    ConfigSource, EnvSource, FileSource, LayeredSource, MapSource, Settings, SettingsManager,
    StorageSettings,
};
pub use credentials::{Credentials, ListDefaults};
pub use error::{Error, Failure, Result, StoreError, StoreResult};
pub use facade::{BlobFacade, ConnectOptions, ContainerOutcome};
pub use memory::{MemoryAccount, MemoryConnector};
pub use payload::Payload;
pub use traits::{AccountStore, BlobInfo, Connector, ContainerStore, ListFilter, UploadOptions};

pub use bf_tabular::{Format, Table};
