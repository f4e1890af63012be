//! bf-tabular: Tabular payloads and file-format codecs for blobframe
//!
//! This crate provides:
//! - `Table`, an in-memory dataset of ordered, named Arrow columns
//! - `TableCodec` implementations for Parquet, CSV and Excel (XLSX)
//! - `Format` for choosing a codec by name or file extension
//!
//! It has no knowledge of storage; callers marshal tables to and from bytes
//! and move the bytes themselves.

pub mod codec;
pub mod columnar;
pub mod delimited;
pub mod error;
pub mod spreadsheet;
pub mod table;

pub use codec::{Format, TableCodec};
pub use columnar::ParquetCodec;
pub use delimited::CsvCodec;
pub use error::{CodecError, Result};
pub use spreadsheet::XlsxCodec;
pub use table::Table;
