use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use crate::config::DatasetConfig;

use super::model::{CellValue, Dataset, RawTable};
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize a wide groundwater table.
pub fn load_dataset(path: &Path, config: &DatasetConfig) -> Result<Dataset> {
    let table = load_table(path)?;
    let dataset = normalize(&table, config)
        .with_context(|| format!("normalizing {}", path.display()))?;
    log::info!(
        "Loaded {} measurements ({} sites, years {:?}) from {}",
        dataset.len(),
        dataset.total_site_count,
        dataset.years,
        path.display()
    );
    Ok(dataset)
}

/// Read a raw table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one row per site
/// * `.json`    – `[{ "NOM_EDO": ..., "NOM_ACUIF": ..., "PNE_2020": ... }, ...]`
/// * `.parquet` – flat columns of strings, ints, floats or bools
pub fn load_table(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = RawTable::new(headers);
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        table.push_row(record.iter().map(text_cell).collect());
    }
    Ok(table)
}

/// CSV cells are kept as text; identifiers like `0101` or `1e3` must not
/// be reinterpreted as numbers. Levels are parsed during normalization.
fn text_cell(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        CellValue::Null
    } else {
        CellValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
///
/// Keys missing from a record read as null.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers = BTreeSet::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        headers.extend(obj.keys().cloned());
    }

    let mut table = RawTable::new(headers.into_iter().collect());
    for rec in records.iter().filter_map(JsonValue::as_object) {
        let cells = table
            .headers
            .iter()
            .map(|h| rec.get(h).map_or(CellValue::Null, json_to_cell))
            .collect();
        table.push_row(cells);
    }
    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table, as written by `df.to_parquet()` in Pandas
/// or `df.write_parquet()` in Polars.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let mut headers = Vec::new();
    for field in builder.schema().fields() {
        let decoded = decoded_type(field.data_type());
        if !is_supported(&decoded) {
            log::warn!(
                "parquet column '{}' has unsupported type {decoded:?}; its cells read as null",
                field.name()
            );
        }
        headers.push(field.name().clone());
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut table = RawTable::new(headers);
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = batch
            .columns()
            .iter()
            .map(decode_column)
            .collect::<Result<Vec<_>>>()?;
        for row in 0..batch.num_rows() {
            let cells = columns
                .iter()
                .map(|col| extract_cell_value(col, row))
                .collect();
            table.push_row(cells);
        }
    }
    Ok(table)
}

/// Plain type a column is read as: dictionaries (Pandas categoricals)
/// decode to their value type, string views to `Utf8`.
fn decoded_type(data_type: &DataType) -> DataType {
    match data_type {
        DataType::Dictionary(_, value) => decoded_type(value),
        DataType::Utf8View => DataType::Utf8,
        other => other.clone(),
    }
}

fn is_supported(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
    )
}

fn decode_column(col: &ArrayRef) -> Result<ArrayRef> {
    let target = decoded_type(col.data_type());
    if &target == col.data_type() {
        return Ok(Arc::clone(col));
    }
    cast(col, &target).with_context(|| format!("decoding {:?} column", col.data_type()))
}

/// Extract a single cell from a decoded Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64)
        }
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => {
            CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64)
        }
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => CellValue::Null,
    }
}
