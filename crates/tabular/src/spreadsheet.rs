//! Excel (XLSX) codec
//!
//! Encoding writes one worksheet: field names in the first row, one column
//! per field, nulls as blank cells. The row count is recorded as the
//! workbook-level name `table_rows`, so rows that are entirely null survive.
//! Worksheet numbers are doubles: 64-bit integers beyond 2^53 are written as
//! text and read back in a Utf8 column.
//!
//! Decoding reads the first worksheet and infers a type per column from the
//! cells present. An empty worksheet decodes to an empty table.

use std::borrow::Cow;
use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type, UInt64Type};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::codec::{Format, TableCodec};
use crate::error::{CodecError, Result};
use crate::table::Table;

/// Last addressable worksheet row (zero-based), leaving row 0 for the header
const MAX_DATA_ROWS: usize = 1_048_575;

/// Last addressable worksheet column count
const MAX_COLUMNS: usize = 16_384;

/// Largest integer magnitude a worksheet number holds exactly
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Defined name carrying the number of data rows
const ROW_COUNT_NAME: &str = "table_rows";

/// Spreadsheet encoder/decoder
#[derive(Debug, Clone)]
pub struct XlsxCodec {
    sheet_name: Cow<'static, str>,
}

impl XlsxCodec {
    pub const fn new() -> Self {
        Self {
            sheet_name: Cow::Borrowed("Sheet1"),
        }
    }

    /// Name of the worksheet written on encode
    pub fn with_sheet_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.sheet_name = name.into();
        self
    }
}

impl Default for XlsxCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCodec for XlsxCodec {
    fn format(&self) -> Format {
        Format::Xlsx
    }

    fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        if table.num_rows() > MAX_DATA_ROWS {
            return Err(CodecError::Invalid(format!(
                "{} rows exceed the worksheet limit of {MAX_DATA_ROWS}",
                table.num_rows()
            )));
        }
        if table.num_columns() > MAX_COLUMNS {
            return Err(CodecError::Invalid(format!(
                "{} columns exceed the worksheet limit of {MAX_COLUMNS}",
                table.num_columns()
            )));
        }

        let mut workbook = Workbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(self.sheet_name.as_ref())?;

            let columns = table.column_names().into_iter().zip(table.columns());
            for (idx, (name, column)) in columns.enumerate() {
                let col = idx as u16;
                sheet.write_string(0, col, name)?;
                write_column(sheet, col, column)?;
            }
        }
        if table.num_columns() > 0 {
            workbook.define_name(ROW_COUNT_NAME, &format!("={}", table.num_rows()))?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn decode(&self, data: &[u8]) -> Result<Table> {
        if data.is_empty() {
            return Err(CodecError::Invalid("empty spreadsheet payload".into()));
        }

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))?;
        let recorded_rows = recorded_row_count(workbook.defined_names());
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CodecError::Invalid("workbook has no worksheets".into()))??;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Table::empty());
        };
        let body: Vec<&[Data]> = rows.collect();
        let num_rows = body.len().max(recorded_rows.unwrap_or(0));

        let columns = header.iter().enumerate().map(|(idx, cell)| {
            let name = match cell {
                Data::Empty => format!("column_{idx}"),
                other => other.to_string(),
            };
            let cells: Vec<&Data> = (0..num_rows)
                .map(|row| {
                    body.get(row)
                        .and_then(|cells| cells.get(idx))
                        .unwrap_or(&Data::Empty)
                })
                .collect();
            (name, infer_column(&cells))
        });

        Table::from_columns(columns)
    }
}

fn write_column(sheet: &mut Worksheet, col: u16, column: &ArrayRef) -> Result<()> {
    let data_type = column.data_type();

    if data_type == &DataType::Boolean {
        let values = column.as_boolean();
        for row in 0..values.len() {
            if values.is_valid(row) {
                sheet.write_boolean(cell_row(row), col, values.value(row))?;
            }
        }
    } else if data_type == &DataType::Int64 {
        let values = column.as_primitive::<Int64Type>();
        for row in 0..values.len() {
            if values.is_valid(row) {
                let value = values.value(row);
                if value.unsigned_abs() > MAX_EXACT_INTEGER {
                    sheet.write_string(cell_row(row), col, value.to_string())?;
                } else {
                    sheet.write_number(cell_row(row), col, value as f64)?;
                }
            }
        }
    } else if data_type == &DataType::UInt64 {
        let values = column.as_primitive::<UInt64Type>();
        for row in 0..values.len() {
            if values.is_valid(row) {
                let value = values.value(row);
                if value > MAX_EXACT_INTEGER {
                    sheet.write_string(cell_row(row), col, value.to_string())?;
                } else {
                    sheet.write_number(cell_row(row), col, value as f64)?;
                }
            }
        }
    } else if data_type.is_numeric() {
        let floats = cast(column.as_ref(), &DataType::Float64)?;
        let values = floats.as_primitive::<Float64Type>();
        for row in 0..values.len() {
            if values.is_valid(row) {
                sheet.write_number(cell_row(row), col, values.value(row))?;
            }
        }
    } else {
        let formatter = ArrayFormatter::try_new(column.as_ref(), &FormatOptions::default())?;
        for row in 0..column.len() {
            if column.is_valid(row) {
                sheet.write_string(cell_row(row), col, formatter.value(row).to_string())?;
            }
        }
    }

    Ok(())
}

fn recorded_row_count(names: &[(String, String)]) -> Option<usize> {
    names
        .iter()
        .find(|(name, _)| name == ROW_COUNT_NAME)
        .and_then(|(_, value)| value.trim_start_matches('=').trim().parse().ok())
}

/// Worksheet row for a zero-based data row (row 0 holds the header)
fn cell_row(row: usize) -> u32 {
    (row + 1) as u32
}

fn infer_column(cells: &[&Data]) -> ArrayRef {
    let present: Vec<&Data> = cells
        .iter()
        .copied()
        .filter(|c| !matches!(c, Data::Empty))
        .collect();

    let all_numeric = present
        .iter()
        .all(|c| matches!(c, Data::Int(_) | Data::Float(_)));
    let all_integral = present.iter().all(|c| match c {
        Data::Int(_) => true,
        Data::Float(f) => f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64,
        _ => false,
    });

    if present.is_empty() {
        Arc::new(StringArray::from(vec![None::<&str>; cells.len()]))
    } else if all_integral {
        Arc::new(Int64Array::from_iter(cells.iter().map(|c| match c {
            Data::Int(i) => Some(*i),
            Data::Float(f) => Some(*f as i64),
            _ => None,
        })))
    } else if all_numeric {
        Arc::new(Float64Array::from_iter(cells.iter().map(|c| match c {
            Data::Int(i) => Some(*i as f64),
            Data::Float(f) => Some(*f),
            _ => None,
        })))
    } else if present.iter().all(|c| matches!(c, Data::Bool(_))) {
        Arc::new(BooleanArray::from_iter(cells.iter().map(|c| match c {
            Data::Bool(b) => Some(*b),
            _ => None,
        })))
    } else {
        Arc::new(StringArray::from_iter(cells.iter().map(|c| match c {
            Data::Empty => None,
            other => Some(other.to_string()),
        })))
    }
}
