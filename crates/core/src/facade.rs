//! Blob facade
//!
//! `BlobFacade` binds one storage account and one container at construction
//! and exposes the blob, container and table operations on top of them. Every
//! operation is a single delegated call or a short fixed sequence; failures
//! come back as `Error::Operation` tagged with the operation's verb.

use std::fmt;

use bf_tabular::{CsvCodec, Format, Table, TableCodec};
use tracing::{debug, info};

use crate::config::{ConfigSource, non_empty};
use crate::credentials::{Credentials, ListDefaults};
use crate::error::{Error, Failure, Result, StoreError};
use crate::payload::Payload;
use crate::traits::{AccountStore, BlobInfo, Connector, ContainerStore, ListFilter, UploadOptions};

/// Verbs used in operation error messages
pub mod verbs {
    pub const LIST_BLOBS: &str = "listing blobs";
    pub const LIST_CONTAINERS: &str = "listing containers";
    pub const CREATE_CONTAINER: &str = "creating container";
    pub const DELETE_CONTAINER: &str = "deleting container";
    pub const UPLOAD_BLOB: &str = "uploading blob";
    pub const DOWNLOAD_BLOB: &str = "downloading blob";
    pub const DELETE_BLOB: &str = "deleting blob";
    pub const PARQUET_TO_TABLE: &str = "converting Parquet to table";
    pub const TABLE_TO_PARQUET: &str = "converting table to Parquet";
    pub const CSV_TO_TABLE: &str = "converting CSV to table";
    pub const TABLE_TO_CSV: &str = "converting table to CSV";
    pub const TABLE_TO_EXCEL: &str = "converting table to Excel";
    pub const EXCEL_TO_TABLE: &str = "converting Excel to table";
}

/// Verb for decoding a blob in `format`
pub const fn read_verb(format: Format) -> &'static str {
    match format {
        Format::Parquet => verbs::PARQUET_TO_TABLE,
        Format::Csv => verbs::CSV_TO_TABLE,
        Format::Xlsx => verbs::EXCEL_TO_TABLE,
    }
}

/// Verb for encoding a table as `format`
pub const fn write_verb(format: Format) -> &'static str {
    match format {
        Format::Parquet => verbs::TABLE_TO_PARQUET,
        Format::Csv => verbs::TABLE_TO_CSV,
        Format::Xlsx => verbs::TABLE_TO_EXCEL,
    }
}

/// Explicit values for facade construction
///
/// Absent or empty fields fall back to configuration.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    pub connection_string: Option<String>,
    pub container: Option<String>,
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection_string(mut self, value: impl Into<String>) -> Self {
        self.connection_string = Some(value.into());
        self
    }

    pub fn with_container(mut self, value: impl Into<String>) -> Self {
        self.container = Some(value.into());
        self
    }
}

/// Result of `BlobFacade::create_container`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerOutcome {
    Created(String),
    AlreadyExists(String),
}

impl ContainerOutcome {
    pub fn name(&self) -> &str {
        match self {
            ContainerOutcome::Created(name) | ContainerOutcome::AlreadyExists(name) => name,
        }
    }

    pub fn created(&self) -> bool {
        matches!(self, ContainerOutcome::Created(_))
    }
}

impl fmt::Display for ContainerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerOutcome::Created(name) => write!(f, "Container '{name}' created successfully"),
            ContainerOutcome::AlreadyExists(name) => write!(f, "Container '{name}' already exists"),
        }
    }
}

/// Storage facade bound to one account and one container
pub struct BlobFacade {
    credentials: Credentials,
    defaults: ListDefaults,
    account: Box<dyn AccountStore>,
    container: Box<dyn ContainerStore>,
}

impl BlobFacade {
    /// Resolve credentials and list defaults from `source`, then open handles
    pub fn connect(
        connector: &dyn Connector,
        source: &dyn ConfigSource,
        options: &ConnectOptions,
    ) -> Result<Self> {
        let credentials = Credentials::resolve(
            options.connection_string.as_deref(),
            options.container.as_deref(),
            source,
        )?;
        Self::open(connector, credentials, ListDefaults::from_source(source))
    }

    /// Open the account handle, then the container handle
    ///
    /// The container is not checked for existence.
    pub fn open(
        connector: &dyn Connector,
        credentials: Credentials,
        defaults: ListDefaults,
    ) -> Result<Self> {
        let account = connector
            .connect(credentials.connection_string())
            .map_err(Error::Connection)?;
        let container = account
            .container(credentials.container())
            .map_err(Error::Connection)?;

        info!(container = credentials.container(), "Storage handles ready");
        Ok(Self {
            credentials,
            defaults,
            account,
            container,
        })
    }

    /// Name of the bound container
    pub fn container_name(&self) -> &str {
        self.credentials.container()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn list_defaults(&self) -> &ListDefaults {
        &self.defaults
    }

    /// Names of blobs in the bound container
    ///
    /// `prefix` and `suffix` fall back to the construction-time defaults.
    pub fn list_blobs(&self, prefix: Option<&str>, suffix: Option<&str>) -> Result<Vec<String>> {
        Ok(self
            .list_blob_details(prefix, suffix)?
            .into_iter()
            .map(|blob| blob.name)
            .collect())
    }

    /// Like `list_blobs`, keeping size and modification time
    pub fn list_blob_details(
        &self,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Vec<BlobInfo>> {
        let filter = self.filter(prefix, suffix);
        debug!(?filter, container = self.container_name(), "Listing blobs");

        let blobs = self
            .container
            .list_blobs(&filter)
            .map_err(|e| Error::operation(verbs::LIST_BLOBS, e))?;
        Ok(blobs
            .into_iter()
            .filter(|blob| filter.matches(&blob.name))
            .collect())
    }

    fn filter(&self, prefix: Option<&str>, suffix: Option<&str>) -> ListFilter {
        ListFilter {
            prefix: non_empty(prefix.map(str::to_owned)).or_else(|| self.defaults.prefix.clone()),
            suffix: non_empty(suffix.map(str::to_owned)).or_else(|| self.defaults.suffix.clone()),
        }
    }

    /// Names of all containers in the account
    pub fn list_containers(&self) -> Result<Vec<String>> {
        self.account
            .list_containers()
            .map_err(|e| Error::operation(verbs::LIST_CONTAINERS, e))
    }

    /// Create a container unless one with that name exists
    pub fn create_container(&self, name: &str) -> Result<ContainerOutcome> {
        let verb = verbs::CREATE_CONTAINER;
        require_container_name(verb, name)?;

        let existing = self
            .account
            .list_containers()
            .map_err(|e| Error::operation(verb, e))?;
        if existing.iter().any(|c| c == name) {
            debug!(container = name, "Container already exists");
            return Ok(ContainerOutcome::AlreadyExists(name.to_string()));
        }

        match self.account.create_container(name) {
            Ok(()) => {
                info!(container = name, "Created container");
                Ok(ContainerOutcome::Created(name.to_string()))
            }
            // Created concurrently between the listing and the create
            Err(StoreError::Conflict(_)) => Ok(ContainerOutcome::AlreadyExists(name.to_string())),
            Err(e) => Err(Error::operation(verb, e)),
        }
    }

    /// Delete a container and everything in it
    pub fn delete_container(&self, name: &str) -> Result<String> {
        let verb = verbs::DELETE_CONTAINER;
        require_container_name(verb, name)?;

        self.account
            .delete_container(name)
            .map_err(|e| Error::operation(verb, e))?;
        info!(container = name, "Deleted container");
        Ok(format!("Container '{name}' deleted successfully"))
    }

    /// Write a blob to the bound container
    ///
    /// The content type is guessed from the blob name. Without `overwrite`
    /// an existing blob makes this fail with a conflict.
    pub fn upload_blob<'a>(
        &self,
        name: &str,
        payload: impl Into<Payload<'a>>,
        overwrite: bool,
    ) -> Result<String> {
        let verb = verbs::UPLOAD_BLOB;
        require_blob_name(verb, name)?;

        let data = payload
            .into()
            .into_bytes()
            .map_err(|e| Error::operation(verb, e))?;
        let options = UploadOptions {
            overwrite,
            content_type: mime_guess::from_path(name).first_raw().map(str::to_owned),
        };
        debug!(
            blob = name,
            size = data.len(),
            overwrite,
            content_type = options.content_type.as_deref(),
            "Uploading blob"
        );

        self.container
            .upload_blob(name, data, &options)
            .map_err(|e| Error::operation(verb, e))?;
        Ok(format!("Blob '{name}' uploaded successfully"))
    }

    /// Read a blob's full content
    pub fn download_blob(&self, name: &str) -> Result<Vec<u8>> {
        let verb = verbs::DOWNLOAD_BLOB;
        require_blob_name(verb, name)?;

        debug!(blob = name, "Downloading blob");
        self.container
            .download_blob(name)
            .map_err(|e| Error::operation(verb, e))
    }

    /// Remove a blob
    pub fn delete_blob(&self, name: &str) -> Result<String> {
        let verb = verbs::DELETE_BLOB;
        require_blob_name(verb, name)?;

        self.container
            .delete_blob(name)
            .map_err(|e| Error::operation(verb, e))?;
        debug!(blob = name, "Deleted blob");
        Ok(format!("Blob '{name}' deleted successfully"))
    }

    pub fn parquet_to_table(&self, name: &str) -> Result<Table> {
        self.read_table(name, Format::Parquet)
    }

    pub fn table_to_parquet(&self, table: &Table, name: &str) -> Result<String> {
        self.write_table(table, name, Format::Parquet)
    }

    pub fn csv_to_table(&self, name: &str) -> Result<Table> {
        self.read_table(name, Format::Csv)
    }

    pub fn table_to_csv(&self, table: &Table, name: &str) -> Result<String> {
        self.write_table(table, name, Format::Csv)
    }

    pub fn excel_to_table(&self, name: &str) -> Result<Table> {
        self.read_table(name, Format::Xlsx)
    }

    pub fn table_to_excel(&self, table: &Table, name: &str) -> Result<String> {
        self.write_table(table, name, Format::Xlsx)
    }

    /// Download a blob and decode it as `format`
    pub fn read_table(&self, name: &str, format: Format) -> Result<Table> {
        let verb = read_verb(format);
        let bytes = self.download_blob(name).map_err(|e| e.retag(verb))?;
        let table = format
            .codec()
            .decode(&bytes)
            .map_err(|e| Error::operation(verb, e))?;
        debug!(
            blob = name,
            %format,
            rows = table.num_rows(),
            columns = table.num_columns(),
            "Decoded table"
        );
        Ok(table)
    }

    /// Encode a table as `format` and upload it, replacing any existing blob
    pub fn write_table(&self, table: &Table, name: &str, format: Format) -> Result<String> {
        let verb = write_verb(format);
        require_blob_name(verb, name)?;

        let payload: Payload<'_> = match format {
            Format::Csv => CsvCodec::new().encode_text(table).map(Payload::from),
            other => other.codec().encode(table).map(Payload::from),
        }
        .map_err(|e| Error::operation(verb, e))?;

        self.upload_blob(name, payload, true)
            .map_err(|e| e.retag(verb))
    }
}

impl fmt::Debug for BlobFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobFacade")
            .field("credentials", &self.credentials)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

fn require_blob_name(verb: &'static str, name: &str) -> Result<()> {
    require_name(verb, name, "blob name must not be empty")
}

fn require_container_name(verb: &'static str, name: &str) -> Result<()> {
    require_name(verb, name, "container name must not be empty")
}

fn require_name(verb: &'static str, name: &str, message: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::operation(
            verb,
            Failure::InvalidInput(message.to_string()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSource;
    use crate::traits::{MockAccountStore, MockConnector, MockContainerStore};

    fn connector_for(account: MockAccountStore) -> MockConnector {
        let mut connector = MockConnector::new();
        connector
            .expect_connect()
            .return_once(move |_| Ok(Box::new(account)));
        connector
    }

    fn facade(mut account: MockAccountStore, container: MockContainerStore) -> BlobFacade {
        account
            .expect_container()
            .return_once(move |_| Ok(Box::new(container)));
        BlobFacade::open(
            &connector_for(account),
            Credentials::new("SEC", "mycontainer"),
            ListDefaults::default(),
        )
        .unwrap()
    }

    fn with_container(container: MockContainerStore) -> BlobFacade {
        facade(MockAccountStore::new(), container)
    }

    fn with_account(account: MockAccountStore) -> BlobFacade {
        facade(account, MockContainerStore::new())
    }

    #[test]
    fn test_connect_binds_resolved_container() {
        let mut account = MockAccountStore::new();
        account
            .expect_container()
            .withf(|name| name == "mycontainer")
            .times(1)
            .return_once(|_| Ok(Box::new(MockContainerStore::new())));
        let mut connector = MockConnector::new();
        connector
            .expect_connect()
            .withf(|s| s == "SEC")
            .times(1)
            .return_once(move |_| Ok(Box::new(account)));

        let options = ConnectOptions::new()
            .with_connection_string("SEC")
            .with_container("mycontainer");
        let facade = BlobFacade::connect(&connector, &MapSource::new(), &options).unwrap();
        assert_eq!(facade.container_name(), "mycontainer");
        assert_eq!(facade.credentials().connection_string(), "SEC");
    }

    #[test]
    fn test_connect_missing_settings_never_calls_connector() {
        let mut connector = MockConnector::new();
        connector.expect_connect().never();
        let err = BlobFacade::connect(&connector, &MapSource::new(), &ConnectOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_connector_failure_is_connection_error() {
        let mut connector = MockConnector::new();
        connector.expect_connect().return_once(|_| {
            Err(StoreError::InvalidConnectionString(
                "missing AccountName".into(),
            ))
        });
        let err = BlobFacade::open(
            &connector,
            Credentials::new("bogus", "c"),
            ListDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
        assert!(err.to_string().contains("missing AccountName"));
    }

    #[test]
    fn test_container_handle_failure_is_connection_error() {
        let mut account = MockAccountStore::new();
        account
            .expect_container()
            .return_once(|_| Err(StoreError::Service("bad container name".into())));
        let err = BlobFacade::open(
            &connector_for(account),
            Credentials::new("SEC", "Bad_Name"),
            ListDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }

    #[test]
    fn test_list_uses_construction_defaults() {
        let mut container = MockContainerStore::new();
        container
            .expect_list_blobs()
            .withf(|filter| filter.prefix.as_deref() == Some("a/") && filter.suffix.is_none())
            .times(1)
            .returning(|_| Ok(vec![BlobInfo::new("a/1"), BlobInfo::new("a/2")]));
        let mut account = MockAccountStore::new();
        account
            .expect_container()
            .return_once(move |_| Ok(Box::new(container)));

        let source = MapSource::new().with("BLOB_PREFIX", "a/");
        let facade = BlobFacade::connect(
            &connector_for(account),
            &source,
            &ConnectOptions::new()
                .with_connection_string("SEC")
                .with_container("c"),
        )
        .unwrap();
        assert_eq!(facade.list_blobs(None, None).unwrap(), vec!["a/1", "a/2"]);
    }

    #[test]
    fn test_list_explicit_prefix_wins() {
        let mut container = MockContainerStore::new();
        container
            .expect_list_blobs()
            .withf(|filter| filter.prefix.as_deref() == Some("b/"))
            .returning(|_| Ok(vec![BlobInfo::new("b/1")]));
        let mut account = MockAccountStore::new();
        account
            .expect_container()
            .return_once(move |_| Ok(Box::new(container)));
        let facade = BlobFacade::open(
            &connector_for(account),
            Credentials::new("SEC", "c"),
            ListDefaults {
                prefix: Some("a/".into()),
                suffix: None,
            },
        )
        .unwrap();
        assert_eq!(facade.list_blobs(Some("b/"), None).unwrap(), vec!["b/1"]);
    }

    #[test]
    fn test_list_applies_suffix_to_returned_names() {
        let mut container = MockContainerStore::new();
        container.expect_list_blobs().returning(|_| {
            Ok(vec![
                BlobInfo::new("x.csv"),
                BlobInfo::new("x.parquet"),
                BlobInfo::new("y.csv"),
            ])
        });
        let facade = with_container(container);
        assert_eq!(
            facade.list_blobs(None, Some(".csv")).unwrap(),
            vec!["x.csv", "y.csv"]
        );
    }

    #[test]
    fn test_list_failure_is_tagged() {
        let mut container = MockContainerStore::new();
        container
            .expect_list_blobs()
            .returning(|_| Err(StoreError::Network("connection reset".into())));
        let err = with_container(container).list_blobs(None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error listing blobs: Network error: connection reset"
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_create_container_skips_existing() {
        let mut account = MockAccountStore::new();
        account
            .expect_list_containers()
            .returning(|| Ok(vec!["mycontainer".into()]));
        account.expect_create_container().never();
        let outcome = with_account(account).create_container("mycontainer").unwrap();
        assert!(!outcome.created());
        assert_eq!(outcome.to_string(), "Container 'mycontainer' already exists");
    }

    #[test]
    fn test_create_container_creates_missing() {
        let mut account = MockAccountStore::new();
        account.expect_list_containers().returning(|| Ok(vec![]));
        account
            .expect_create_container()
            .withf(|name| name == "fresh")
            .times(1)
            .returning(|_| Ok(()));
        let outcome = with_account(account).create_container("fresh").unwrap();
        assert_eq!(outcome, ContainerOutcome::Created("fresh".into()));
        assert_eq!(outcome.to_string(), "Container 'fresh' created successfully");
    }

    #[test]
    fn test_create_container_race_reports_existing() {
        let mut account = MockAccountStore::new();
        account.expect_list_containers().returning(|| Ok(vec![]));
        account
            .expect_create_container()
            .returning(|_| Err(StoreError::Conflict("exists".into())));
        let outcome = with_account(account).create_container("c").unwrap();
        assert_eq!(outcome, ContainerOutcome::AlreadyExists("c".into()));
    }

    #[test]
    fn test_delete_container_message() {
        let mut account = MockAccountStore::new();
        account
            .expect_delete_container()
            .withf(|name| name == "old")
            .returning(|_| Ok(()));
        assert_eq!(
            with_account(account).delete_container("old").unwrap(),
            "Container 'old' deleted successfully"
        );
    }

    #[test]
    fn test_empty_names_rejected_before_delegation() {
        let mut account = MockAccountStore::new();
        account.expect_list_containers().never();
        account.expect_delete_container().never();
        let mut container = MockContainerStore::new();
        container.expect_upload_blob().never();
        container.expect_download_blob().never();
        container.expect_delete_blob().never();
        let facade = facade(account, container);

        let err = facade.upload_blob("", "data", false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error uploading blob: blob name must not be empty"
        );
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            facade.download_blob("").unwrap_err().verb(),
            Some(verbs::DOWNLOAD_BLOB)
        );
        assert_eq!(
            facade.delete_blob("").unwrap_err().verb(),
            Some(verbs::DELETE_BLOB)
        );
        assert_eq!(
            facade.create_container("").unwrap_err().to_string(),
            "Error creating container: container name must not be empty"
        );
        assert!(facade.delete_container("").is_err());
    }

    #[test]
    fn test_upload_guesses_content_type() {
        let mut container = MockContainerStore::new();
        container
            .expect_upload_blob()
            .withf(|name, data, options| {
                name == "report.csv"
                    && data == b"a,b\n"
                    && !options.overwrite
                    && options.content_type.as_deref() == Some("text/csv")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        assert_eq!(
            with_container(container)
                .upload_blob("report.csv", "a,b\n", false)
                .unwrap(),
            "Blob 'report.csv' uploaded successfully"
        );
    }

    #[test]
    fn test_upload_unknown_extension_has_no_content_type() {
        let mut container = MockContainerStore::new();
        container
            .expect_upload_blob()
            .withf(|_, _, options| options.content_type.is_none() && options.overwrite)
            .returning(|_, _, _| Ok(()));
        with_container(container)
            .upload_blob("blob-without-extension", vec![1u8, 2], true)
            .unwrap();
    }

    #[test]
    fn test_upload_conflict_surfaces() {
        let mut container = MockContainerStore::new();
        container
            .expect_upload_blob()
            .returning(|_, _, _| Err(StoreError::Conflict("blob 'k' already exists".into())));
        let err = with_container(container)
            .upload_blob("k", b"v", false)
            .unwrap_err();
        assert_eq!(err.verb(), Some(verbs::UPLOAD_BLOB));
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_download_not_found() {
        let mut container = MockContainerStore::new();
        container
            .expect_download_blob()
            .returning(|name| Err(StoreError::NotFound(format!("blob '{name}' does not exist"))));
        let err = with_container(container).download_blob("gone").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error downloading blob: Not found: blob 'gone' does not exist"
        );
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_conversion_retags_nested_download() {
        let mut container = MockContainerStore::new();
        container
            .expect_download_blob()
            .returning(|_| Err(StoreError::NotFound("blob 't.parquet' does not exist".into())));
        let err = with_container(container)
            .parquet_to_table("t.parquet")
            .unwrap_err();
        let msg = err.to_string();
        assert_eq!(
            msg,
            "Error converting Parquet to table: Not found: blob 't.parquet' does not exist"
        );
        assert_eq!(msg.matches("Error ").count(), 1);
    }

    #[test]
    fn test_conversion_retags_nested_upload() {
        let mut container = MockContainerStore::new();
        container
            .expect_upload_blob()
            .returning(|_, _, _| Err(StoreError::Auth("signature mismatch".into())));
        let table = Table::from_columns([(
            "x",
            std::sync::Arc::new(arrow::array::Int64Array::from(vec![1, 2])) as _,
        )])
        .unwrap();
        let err = with_container(container)
            .table_to_excel(&table, "t.xlsx")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error converting table to Excel: Authentication failed: signature mismatch"
        );
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_decode_failure_uses_conversion_verb() {
        let mut container = MockContainerStore::new();
        container
            .expect_download_blob()
            .returning(|_| Ok(Vec::new()));
        let err = with_container(container).csv_to_table("empty.csv").unwrap_err();
        assert_eq!(err.verb(), Some(verbs::CSV_TO_TABLE));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_table_to_csv_uploads_text_with_overwrite() {
        let mut container = MockContainerStore::new();
        container
            .expect_upload_blob()
            .withf(|name, data, options| {
                name == "out.csv" && data == b"x\n1\n2\n" && options.overwrite
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let table = Table::from_columns([(
            "x",
            std::sync::Arc::new(arrow::array::Int64Array::from(vec![1, 2])) as _,
        )])
        .unwrap();
        assert_eq!(
            with_container(container)
                .table_to_csv(&table, "out.csv")
                .unwrap(),
            "Blob 'out.csv' uploaded successfully"
        );
    }

    #[test]
    fn test_verbs_by_format() {
        assert_eq!(read_verb(Format::Xlsx), "converting Excel to table");
        assert_eq!(write_verb(Format::Parquet), "converting table to Parquet");
        assert_eq!(read_verb(Format::Csv), "converting CSV to table");
    }
}
