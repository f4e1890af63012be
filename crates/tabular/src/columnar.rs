//! Parquet codec
//!
//! Writes a single row group stream with Arrow's `ArrowWriter` into an
//! in-memory buffer and reads it back with `ParquetRecordBatchReaderBuilder`.
//! The Arrow schema is embedded in the file metadata, so column types survive
//! a round trip unchanged.

use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::codec::{Format, TableCodec};
use crate::error::{CodecError, Result};
use crate::table::Table;

/// Parquet encoder/decoder
#[derive(Debug, Clone, Copy)]
pub struct ParquetCodec {
    compression: Compression,
}

impl ParquetCodec {
    /// Codec with Snappy compression
    pub const fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
        }
    }

    /// Override the page compression
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .build()
    }
}

impl Default for ParquetCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCodec for ParquetCodec {
    fn format(&self) -> Format {
        Format::Parquet
    }

    fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer =
            ArrowWriter::try_new(Vec::new(), table.schema(), Some(self.writer_properties()))?;
        writer.write(table.batch())?;
        let buffer = writer.into_inner()?;

        tracing::debug!(rows = table.num_rows(), bytes = buffer.len(), "encoded parquet");
        Ok(buffer)
    }

    fn decode(&self, data: &[u8]) -> Result<Table> {
        if data.is_empty() {
            return Err(CodecError::Invalid("empty Parquet payload".into()));
        }

        let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(data))?;
        let schema = builder.schema().clone();
        let batches = builder
            .build()?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Table::from_batches(schema, &batches)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};

    use super::*;

    fn sample() -> Table {
        Table::from_columns([
            ("x", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
            (
                "score",
                Arc::new(Float64Array::from(vec![Some(0.5), None, Some(2.25)])) as ArrayRef,
            ),
            (
                "label",
                Arc::new(StringArray::from(vec!["a", "b", "c"])) as ArrayRef,
            ),
            (
                "ok",
                Arc::new(BooleanArray::from(vec![true, false, true])) as ArrayRef,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_parquet_round_trip() {
        let codec = ParquetCodec::new();
        let table = sample();
        let bytes = codec.encode(&table).unwrap();
        assert_eq!(&bytes[..4], b"PAR1");

        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(decoded.column_names(), vec!["x", "score", "label", "ok"]);
    }

    #[test]
    fn test_parquet_uncompressed_round_trip() {
        let codec = ParquetCodec::new().with_compression(Compression::UNCOMPRESSED);
        let table = sample();
        let decoded = codec.decode(&codec.encode(&table).unwrap()).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_parquet_decode_empty() {
        let err = ParquetCodec::new().decode(&[]).unwrap_err();
        assert!(err.to_string().contains("empty Parquet payload"));
    }

    #[test]
    fn test_parquet_decode_garbage() {
        let result = ParquetCodec::new().decode(b"definitely,not,parquet\n");
        assert!(matches!(result, Err(CodecError::Parquet(_))));
    }
}
