//! CSV codec built on Arrow's CSV reader and writer

use std::io::Cursor;
use std::sync::Arc;

use arrow::csv::reader::Format as CsvFormat;
use arrow::csv::{ReaderBuilder, WriterBuilder};

use crate::codec::{Format, TableCodec};
use crate::error::{CodecError, Result};
use crate::table::Table;

/// Delimited-text encoder/decoder
///
/// Output always carries a header row. Column types are inferred on decode
/// from every row of the payload.
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec {
    delimiter: u8,
}

impl CsvCodec {
    /// Comma-delimited codec
    pub const fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Encode a table as UTF-8 text
    pub fn encode_text(&self, table: &Table) -> Result<String> {
        let bytes = self.encode(table)?;
        String::from_utf8(bytes)
            .map_err(|e| CodecError::Invalid(format!("CSV output is not UTF-8: {e}")))
    }
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCodec for CsvCodec {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut writer = WriterBuilder::new()
                .with_header(true)
                .with_delimiter(self.delimiter)
                .build(&mut buffer);
            writer.write(table.batch())?;
        }
        Ok(buffer)
    }

    fn decode(&self, data: &[u8]) -> Result<Table> {
        if data.is_empty() {
            return Err(CodecError::Invalid("empty CSV payload".into()));
        }

        let format = CsvFormat::default()
            .with_header(true)
            .with_delimiter(self.delimiter);
        let (schema, _) = format.infer_schema(Cursor::new(data), None)?;
        let schema = Arc::new(schema);

        let batches = ReaderBuilder::new(schema.clone())
            .with_header(true)
            .with_delimiter(self.delimiter)
            .build(Cursor::new(data))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Table::from_batches(schema, &batches)
    }
}
