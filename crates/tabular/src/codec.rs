//! Codec trait and format selection

use std::fmt;
use std::str::FromStr;

use crate::columnar::ParquetCodec;
use crate::delimited::CsvCodec;
use crate::error::{CodecError, Result};
use crate::spreadsheet::XlsxCodec;
use crate::table::Table;

static PARQUET: ParquetCodec = ParquetCodec::new();
static CSV: CsvCodec = CsvCodec::new();
static XLSX: XlsxCodec = XlsxCodec::new();

/// Paired encode/decode capability for one tabular file format
pub trait TableCodec: Send + Sync {
    /// Format handled by this codec
    fn format(&self) -> Format;

    /// Serialize a table into a complete file image
    fn encode(&self, table: &Table) -> Result<Vec<u8>>;

    /// Parse a complete file image into a table
    fn decode(&self, data: &[u8]) -> Result<Table>;
}

/// Supported tabular file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Apache Parquet columnar format
    Parquet,
    /// Comma-separated values with a header row
    Csv,
    /// Office Open XML spreadsheet
    Xlsx,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Parquet, Format::Csv, Format::Xlsx];

    /// Stable lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Format::Parquet => "parquet",
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
        }
    }

    /// Conventional file extension, without the dot
    pub const fn extension(self) -> &'static str {
        self.name()
    }

    /// Infer the format from a blob or file name's extension
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
            .ok_or_else(|| {
                CodecError::UnsupportedFormat(format!("cannot infer format from '{path}'"))
            })?;
        ext.parse()
    }

    /// Default codec instance for this format
    pub fn codec(self) -> &'static dyn TableCodec {
        match self {
            Format::Parquet => &PARQUET,
            Format::Csv => &CSV,
            Format::Xlsx => &XLSX,
        }
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "parquet" | "pq" => Ok(Format::Parquet),
            "csv" => Ok(Format::Csv),
            "xlsx" | "excel" => Ok(Format::Xlsx),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
