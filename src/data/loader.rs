use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::RawRecord;

/// Column names every source must provide.
const COLUMNS: [&str; 6] = ["country", "latitude", "longitude", "name", "m1", "m2"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load country records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat columns `country, latitude, longitude, name, m1, m2`
/// * `.json`    – `[{ "country": "USA", "latitude": 38, ... }, ...]`
/// * `.csv`     – header row with the same column names
///
/// Null or empty numeric cells load as `NaN` and are rejected later by the
/// pipeline; cells holding non-numeric text are a load error.
pub fn load_file(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "country": "USA", "latitude": 38, "longitude": -97,
///     "name": "United States", "m1": 100, "m2": 50 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<RawRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> Result<RawRecord> {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;

            let country = match obj.get("country") {
                Some(JsonValue::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(JsonValue::String(_)) | Some(JsonValue::Null) | None => None,
                Some(other) => bail!("Row {i}: 'country' must be a string, got {other}"),
            };
            let name = match obj.get("name") {
                Some(JsonValue::String(s)) => s.clone(),
                Some(JsonValue::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };

            Ok(RawRecord {
                country,
                latitude: json_number(obj.get("latitude"), i, "latitude")?,
                longitude: json_number(obj.get("longitude"), i, "longitude")?,
                name,
                m1: json_number(obj.get("m1"), i, "m1")?,
                m2: json_number(obj.get("m2"), i, "m2")?,
            })
        })
        .collect()
}

fn json_number(val: Option<&JsonValue>, row: usize, col: &str) -> Result<f64> {
    match val {
        None | Some(JsonValue::Null) => Ok(f64::NAN),
        Some(v) => v
            .as_f64()
            .with_context(|| format!("Row {row}, {col}: {v} is not a number")),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with (at least) the six record columns, in any
/// order. Extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRecord>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut idx = [0usize; COLUMNS.len()];
    for (slot, col) in idx.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == col)
            .with_context(|| format!("CSV missing '{col}' column"))?;
    }
    let [country_idx, lat_idx, lon_idx, name_idx, m1_idx, m2_idx] = idx;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| record.get(i).unwrap_or("").trim();

        let country = match cell(country_idx) {
            "" => None,
            code => Some(code.to_string()),
        };

        records.push(RawRecord {
            country,
            latitude: parse_cell(cell(lat_idx), row_no, "latitude")?,
            longitude: parse_cell(cell(lon_idx), row_no, "longitude")?,
            name: cell(name_idx).to_string(),
            m1: parse_cell(cell(m1_idx), row_no, "m1")?,
            m2: parse_cell(cell(m2_idx), row_no, "m2")?,
        });
    }

    Ok(records)
}

fn parse_cell(s: &str, row: usize, col: &str) -> Result<f64> {
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of country statistics.
///
/// Expected schema:
/// - `country`, `name`: Utf8 or LargeUtf8
/// - `latitude`, `longitude`, `m1`, `m2`: Float64, Float32, Int64 or Int32
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut cols = Vec::with_capacity(COLUMNS.len());
        for name in COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            cols.push(batch.column(idx));
        }
        let [country, lat, lon, name, m1, m2] = [
            cols[0], cols[1], cols[2], cols[3], cols[4], cols[5],
        ];

        for row in 0..batch.num_rows() {
            records.push(RawRecord {
                country: extract_string(country, row)
                    .with_context(|| format!("Row {row}: failed to read 'country'"))?
                    .filter(|s| !s.is_empty()),
                latitude: extract_f64(lat, row)
                    .with_context(|| format!("Row {row}: failed to read 'latitude'"))?,
                longitude: extract_f64(lon, row)
                    .with_context(|| format!("Row {row}: failed to read 'longitude'"))?,
                name: extract_string(name, row)
                    .with_context(|| format!("Row {row}: failed to read 'name'"))?
                    .unwrap_or_default(),
                m1: extract_f64(m1, row)
                    .with_context(|| format!("Row {row}: failed to read 'm1'"))?,
                m2: extract_f64(m2, row)
                    .with_context(|| format!("Row {row}: failed to read 'm2'"))?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Read a string cell; nulls become `None`.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(col.as_string::<i32>().value(row).to_string())),
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    }
}

/// Read a numeric cell as `f64`; nulls become `NaN`.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(row) as f64),
        other => bail!("Expected a numeric column, got {other:?}"),
    }
}
