//! In-memory tabular payload
//!
//! A `Table` is a single Arrow `RecordBatch`: an ordered sequence of named
//! columns sharing one row count. Codecs produce and consume it; nothing in
//! it refers to row positions, so no index column ever appears in an export.

use std::fmt;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::compute::concat_batches;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;

/// Ordered, named columns of equal length
#[derive(Debug, Clone)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    /// Wrap an existing record batch
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Build a table from `(name, column)` pairs, preserving their order
    ///
    /// All columns must have the same length. Every field is nullable.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: Into<String>,
    {
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns
            .into_iter()
            .map(|(name, array)| (Field::new(name, array.data_type().clone(), true), array))
            .unzip();

        if arrays.is_empty() {
            return Ok(Self::empty());
        }

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Ok(Self { batch })
    }

    /// Concatenate decoded batches that share `schema` into one table
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let batch = concat_batches(&schema, batches)?;
        Ok(Self { batch })
    }

    /// A table with no columns and no rows
    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(Arc::new(Schema::empty())),
        }
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    pub fn columns(&self) -> &[ArrayRef] {
        self.batch.columns()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Borrow the underlying record batch
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    /// Render at most `limit` rows as an ASCII table
    pub fn pretty(&self, limit: Option<usize>) -> Result<String> {
        let rows = limit.map_or(self.num_rows(), |l| l.min(self.num_rows()));
        let shown = self.batch.slice(0, rows);
        Ok(pretty_format_batches(&[shown])?.to_string())
    }
}

impl From<RecordBatch> for Table {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

/// Two tables are equal when they have the same column names, in the same
/// order, with equal values. Field nullability and schema metadata are ignored.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.column_names() == other.column_names()
            && self.num_rows() == other.num_rows()
            && self
                .columns()
                .iter()
                .zip(other.columns())
                .all(|(a, b)| a.as_ref() == b.as_ref())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pretty(None) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "<table {}x{}>", self.num_rows(), self.num_columns()),
        }
    }
}
