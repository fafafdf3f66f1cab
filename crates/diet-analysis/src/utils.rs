//! Shared utilities for the analysis pipeline.
//!
//! Helpers for reading typed values out of polars frames, small statistics,
//! and row-level reshaping that several aggregators share.

use crate::error::Result;
use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Column Access
// =============================================================================

/// Check whether the frame has a column with this exact name.
#[inline]
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Read a column as a Float64 series.
///
/// Values that cannot be cast become null.
pub fn float_series(df: &DataFrame, name: &str) -> Result<Series> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series.cast(&DataType::Float64)?)
}

/// Read a column as a Float64 series, failing if any present value is not
/// a number.
pub fn strict_float_series(df: &DataFrame, name: &str) -> Result<Series> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series.strict_cast(&DataType::Float64)?)
}

/// Read a column as `f64` values, one per row.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = float_series(df, name)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Read a column as owned strings, one per row.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Select rows by position, in the given order.
pub fn take_rows(df: &DataFrame, rows: &[usize]) -> Result<DataFrame> {
    let indices: Vec<IdxSize> = rows.iter().map(|&i| i as IdxSize).collect();
    let idx = IdxCa::from_vec("row_index".into(), indices);
    Ok(df.take(&idx)?)
}

// =============================================================================
// Grouping
// =============================================================================

/// Group row positions by key.
///
/// Groups come out in ascending key order; positions inside a group keep
/// their original row order. Rows with a null key belong to no group.
pub fn group_rows(keys: &[Option<String>]) -> BTreeMap<String, Vec<usize>> {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (row, key) in keys.iter().enumerate() {
        if let Some(key) = key {
            groups.entry(key.clone()).or_default().push(row);
        }
    }
    groups
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Sample standard deviation (n - 1 denominator).
///
/// Undefined for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    Some(variance.sqrt())
}

/// Percentile of ascending-sorted values with linear interpolation.
///
/// `quantile` is in `[0.0, 1.0]`.
pub fn percentile(sorted: &[f64], quantile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = quantile.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Most frequent value; ties go to the value encountered first.
pub fn string_mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value.to_string())
}

// =============================================================================
// JSON Conversion
// =============================================================================

/// Convert a single polars value to JSON.
///
/// Non-finite floats become `null`.
pub fn any_value_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => float_to_json(v as f64),
        AnyValue::Float64(v) => float_to_json(v),
        other => Value::String(other.to_string()),
    }
}

fn float_to_json(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Pretty-printed JSON for any serializable value.
pub fn to_json_pretty<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Convert a frame to an array of `{column: value}` records in row order.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<Map<String, Value>>> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut record = Map::with_capacity(names.len());
        for (name, column) in names.iter().zip(df.get_columns()) {
            record.insert(name.clone(), any_value_to_json(column.get(row)?));
        }
        records.push(record);
    }
    Ok(records)
}
