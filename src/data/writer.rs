use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value as JsonValue};

use super::model::SampleTable;

/// Write `table` to a file in the format implied by its extension, in the
/// same layouts [`super::loader::load_file`] reads.
pub fn write_file(table: &SampleTable, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => write_parquet(table, path),
        "json" => write_json(table, path),
        "csv" => write_csv(table, path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("writing {}", path.display()))?;

    log::info!("Wrote {} samples to {}", table.len(), path.display());
    Ok(())
}

fn write_csv(table: &SampleTable, path: &Path) -> Result<()> {
    let (headers, data) = table.to_columns();
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(&headers)?;
    for row in 0..table.len() {
        let record: Vec<String> = data
            .iter()
            .map(|col| {
                let v = col[row];
                if v.is_nan() {
                    String::new()
                } else {
                    v.to_string()
                }
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(table: &SampleTable, path: &Path) -> Result<()> {
    let (headers, data) = table.to_columns();
    let mut obj = Map::new();
    for (name, values) in headers.into_iter().zip(data) {
        // NaN has no JSON spelling and is written as null.
        obj.insert(name, JsonValue::from(values));
    }
    let text = serde_json::to_string_pretty(&JsonValue::Object(obj))?;
    std::fs::write(path, text).context("writing JSON file")?;
    Ok(())
}

fn write_parquet(table: &SampleTable, path: &Path) -> Result<()> {
    let (headers, data) = table.to_columns();
    let schema = Arc::new(Schema::new(
        headers
            .iter()
            .map(|name| Field::new(name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = data
        .into_iter()
        .map(|values| Arc::new(Float64Array::from(values)) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::units::{Axis, WavelengthArray};
    use std::collections::BTreeMap;

    fn table() -> SampleTable {
        let wl = WavelengthArray::new(vec![1500.0, 1550.0, 1600.0], "nm").unwrap();
        let mut columns = BTreeMap::new();
        columns.insert("neff".to_string(), vec![1.4463, 1.4440, 1.4418]);
        SampleTable::new(Axis::from(wl), columns).unwrap()
    }

    #[test]
    fn every_format_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let written = table();
        for name in ["t.csv", "t.json", "t.parquet"] {
            let path = dir.path().join(name);
            write_file(&written, &path).unwrap();
            let loaded = load_file(&path).unwrap();
            assert_eq!(loaded.column("neff").unwrap(), written.column("neff").unwrap(), "{name}");
            let wl = loaded.axis.as_wavelengths().unwrap().as_nm();
            assert!((wl[2] - 1600.0).abs() < 1e-9, "{name}");
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_file(&table(), &dir.path().join("t.xlsx")).is_err());
    }
}
