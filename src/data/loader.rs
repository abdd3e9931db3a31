use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::SampleTable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sample table from a file.  Dispatch by extension.
///
/// Every format carries one axis column named `kind[unit]`
/// (e.g. `wavelength[nm]`, `omega[rad/s]`) next to plain value columns.
///
/// Supported formats:
/// * `.csv`     – header row, then one row per sample
/// * `.json`    – `{ "wavelength[nm]": [...], "neff": [...] }`
/// * `.parquet` – one Float64 (or Float32 / integer) column per series
pub fn load_file(path: &Path) -> Result<SampleTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} samples on a {} axis with columns [{}] from {}",
        table.len(),
        table.axis.kind_name(),
        table.column_names().join(", "),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (column-oriented, `df.to_json(orient='list')`):
///
/// ```json
/// {
///   "wavelength[nm]": [1500.0, 1510.0, ...],
///   "neff":           [1.4463, 1.4459, ...]
/// }
/// ```
fn load_json(path: &Path) -> Result<SampleTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let obj = root
        .as_object()
        .context("Expected top-level JSON object of arrays")?;

    let mut headers = Vec::with_capacity(obj.len());
    let mut data = Vec::with_capacity(obj.len());
    for (key, val) in obj {
        headers.push(key.clone());
        data.push(json_array_to_f64(val, key)?);
    }

    Ok(SampleTable::from_columns(&headers, data)?)
}

fn json_array_to_f64(val: &JsonValue, col: &str) -> Result<Vec<f64>> {
    let arr = val
        .as_array()
        .with_context(|| format!("column '{col}' is not an array"))?;

    arr.iter()
        .enumerate()
        .map(|(j, v)| {
            if v.is_null() {
                return Ok(f64::NAN);
            }
            v.as_f64()
                .with_context(|| format!("{col}[{j}]: not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one sample per row.
/// Empty cells read as NaN.
fn load_csv(path: &Path) -> Result<SampleTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut data: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: {} fields but {} headers",
                record.len(),
                headers.len()
            );
        }
        for (col_idx, cell) in record.iter().enumerate() {
            data[col_idx].push(parse_cell(cell, row_no, &headers[col_idx])?);
        }
    }

    Ok(SampleTable::from_columns(&headers, data)?)
}

fn parse_cell(cell: &str, row: usize, col: &str) -> Result<f64> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{cell}' is not a number"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one numeric column per series.
///
/// Columns from every record batch are concatenated in order. Works with
/// files written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SampleTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut data: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (col_idx, name) in headers.iter().enumerate() {
            let values = extract_f64_column(batch.column(col_idx))
                .with_context(|| format!("reading column '{name}'"))?;
            data[col_idx].extend(values);
        }
    }

    Ok(SampleTable::from_columns(&headers, data)?)
}

// -- Parquet / Arrow helpers --

/// Read a numeric Arrow column as `f64`; nulls become NaN.
fn extract_f64_column(col: &ArrayRef) -> Result<Vec<f64>> {
    let values = match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect()
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            arr.iter().map(|v| v.map_or(f64::NAN, |i| i as f64)).collect()
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect()
        }
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_csv_rows() {
        let file = write_temp(
            ".csv",
            "wavelength[nm], neff\n1500, 1.4463\n1550, 1.4440\n1600,\n",
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        let neff = table.column("neff").unwrap();
        assert_eq!(neff[1], 1.4440);
        assert!(neff[2].is_nan());
        assert_eq!(table.axis.as_wavelengths().unwrap().as_nm()[0], 1500.0);
    }

    #[test]
    fn loads_json_columns() {
        let file = write_temp(
            ".json",
            r#"{"omega[rad/s]": [1.2e15, 1.21e15], "beta": [5.8e6, 5.85e6]}"#,
        );
        let table = load_file(file.path()).unwrap();
        assert!(table.axis.as_angular_frequencies().is_ok());
        assert_eq!(table.column("beta").unwrap(), &[5.8e6, 5.85e6]);
    }

    #[test]
    fn rejects_bad_inputs() {
        let file = write_temp(".json", r#"[1, 2, 3]"#);
        assert!(load_file(file.path()).is_err());

        let file = write_temp(".csv", "wavelength[nm],neff\n1500,abc\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("abc"));

        let file = write_temp(".csv", "lambda,neff\n1500,1.45\n");
        assert!(load_file(file.path()).is_err());

        let file = write_temp(".txt", "");
        assert!(format!("{:#}", load_file(file.path()).unwrap_err()).contains(".txt"));
    }
}
