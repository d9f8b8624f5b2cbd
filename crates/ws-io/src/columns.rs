//! Typed column extraction from Arrow RecordBatches.
//!
//! Ntuples come with a mix of widths (`Float32` from NanoAOD-style producers,
//! `Float64` from Python tooling, `Int32`/`Int64` identity codes). Columns are
//! widened to `f64` / `i32` here so the event model sees one representation.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Int32Type};
use arrow::record_batch::RecordBatch;

use ws_core::{Error, Result};

/// Column by name, or [`Error::MissingColumn`].
pub fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch.column_by_name(name).ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Whether the batch has a column named `name`.
pub fn has_column(batch: &RecordBatch, name: &str) -> bool {
    batch.schema().index_of(name).is_ok()
}

fn wrong_type(name: &str, expected: &str, actual: &DataType) -> Error {
    Error::WrongType {
        column: name.to_string(),
        expected: expected.to_string(),
        actual: format!("{actual:?}"),
    }
}

fn is_numeric(dt: &DataType) -> bool {
    dt.is_integer() || dt.is_floating()
}

fn list_item(dt: &DataType) -> Option<&DataType> {
    match dt {
        DataType::List(field) | DataType::LargeList(field) => Some(field.data_type()),
        _ => None,
    }
}

/// Scalar numeric column widened to `f64`; nulls become `NaN`.
pub fn scalar_f64(batch: &RecordBatch, name: &str) -> Result<Vec<f64>> {
    let col = column(batch, name)?;
    if !is_numeric(col.data_type()) {
        return Err(wrong_type(name, "Float32/Float64/Int", col.data_type()));
    }
    let casted = cast(col.as_ref(), &DataType::Float64)
        .map_err(|_| wrong_type(name, "Float64", col.data_type()))?;
    Ok(casted.as_primitive::<Float64Type>().iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn null_ints(name: &str, row: Option<usize>) -> Error {
    let at = row.map(|r| format!(" row {r}")).unwrap_or_default();
    Error::SchemaMismatch(format!("column '{name}'{at}: null or out-of-range Int32 value"))
}

/// Scalar integer column narrowed/widened to `i32`.
///
/// Nulls, and values the cast to `Int32` cannot hold, are a
/// [`Error::SchemaMismatch`].
pub fn scalar_i32(batch: &RecordBatch, name: &str) -> Result<Vec<i32>> {
    let col = column(batch, name)?;
    if !col.data_type().is_integer() {
        return Err(wrong_type(name, "Int32/Int64/UInt32", col.data_type()));
    }
    let casted = cast(col.as_ref(), &DataType::Int32)
        .map_err(|_| wrong_type(name, "Int32", col.data_type()))?;
    let values = casted.as_primitive::<Int32Type>();
    if values.null_count() > 0 {
        return Err(null_ints(name, None));
    }
    Ok(values.values().to_vec())
}

/// List column of floats, one `Vec<f64>` per row; null rows are empty.
pub fn list_f64(batch: &RecordBatch, name: &str) -> Result<Vec<Vec<f64>>> {
    let col = column(batch, name)?;
    match list_item(col.data_type()) {
        Some(item) if is_numeric(item) => {}
        _ => return Err(wrong_type(name, "List<Float32/Float64>", col.data_type())),
    }
    let target = DataType::List(Arc::new(Field::new("item", DataType::Float64, true)));
    let casted = cast(col.as_ref(), &target)
        .map_err(|_| wrong_type(name, "List<Float64>", col.data_type()))?;
    let list = casted.as_list::<i32>();

    let mut out = Vec::with_capacity(list.len());
    for i in 0..list.len() {
        if list.is_null(i) {
            out.push(Vec::new());
            continue;
        }
        let values = list.value(i);
        let values = values.as_primitive::<Float64Type>();
        out.push(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect());
    }
    Ok(out)
}

/// List column of integers, one `Vec<i32>` per row; null rows are empty.
///
/// Null elements, and elements out of `Int32` range, are a
/// [`Error::SchemaMismatch`].
pub fn list_i32(batch: &RecordBatch, name: &str) -> Result<Vec<Vec<i32>>> {
    let col = column(batch, name)?;
    match list_item(col.data_type()) {
        Some(item) if item.is_integer() => {}
        _ => return Err(wrong_type(name, "List<Int32/Int64>", col.data_type())),
    }
    let target = DataType::List(Arc::new(Field::new("item", DataType::Int32, true)));
    let casted = cast(col.as_ref(), &target)
        .map_err(|_| wrong_type(name, "List<Int32>", col.data_type()))?;
    let list = casted.as_list::<i32>();

    let mut out = Vec::with_capacity(list.len());
    for i in 0..list.len() {
        if list.is_null(i) {
            out.push(Vec::new());
            continue;
        }
        let values = list.value(i);
        let values = values.as_primitive::<Int32Type>();
        if values.null_count() > 0 {
            return Err(null_ints(name, Some(i)));
        }
        out.push(values.values().to_vec());
    }
    Ok(out)
}

/// Utf8 column as owned strings; nulls become empty strings.
pub fn utf8(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    let col = column(batch, name)?;
    match col.data_type() {
        DataType::Utf8 => {
            Ok(col.as_string::<i32>().iter().map(|v| v.unwrap_or_default().to_string()).collect())
        }
        DataType::LargeUtf8 => {
            Ok(col.as_string::<i64>().iter().map(|v| v.unwrap_or_default().to_string()).collect())
        }
        other => Err(wrong_type(name, "Utf8", other)),
    }
}
