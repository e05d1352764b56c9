use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{bail, Context};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record, REQUIRED_COLUMNS};
use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the growth dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `region,country,industry,value` (any order)
/// * `.json`    – `[{ "region": .., "country": .., "industry": .., "value": .. }, ...]`
/// * `.parquet` – one column per field, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(ChartError::load(
                path,
                format!("unsupported file extension: .{other}"),
            ))
        }
    };

    log::info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ChartError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ChartError::Io(e),
    })
}

/// `value` must be a finite number; `inf` and `NaN` parse as floats but cannot be plotted.
fn finite(path: &Path, value: f64, location: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::load(
            path,
            format!("{location}: value {value} is not a finite number"),
        ))
    }
}

fn missing_column(path: &Path, column: &str) -> ChartError {
    ChartError::Schema {
        path: path.to_path_buf(),
        column: column.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Extra columns are ignored; blank lines are skipped.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers = reader
        .headers()
        .map_err(|e| ChartError::load(path, format!("reading CSV headers: {e}")))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(missing_column(path, column));
        }
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| ChartError::load(path, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let record: Record = row
            .deserialize(Some(&headers))
            .map_err(|e| ChartError::load(path, format!("line {line}: {e}")))?;
        finite(path, record.value, &format!("line {line}"))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "region": "US", "country": "United States", "industry": "Tech & IT", "value": 20.1 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::io::read_to_string(open(path)?)?;
    let root: JsonValue = serde_json::from_str(&text)
        .map_err(|e| ChartError::load(path, format!("parsing JSON: {e}")))?;

    let rows = root
        .as_array()
        .ok_or_else(|| ChartError::load(path, "expected top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| ChartError::load(path, format!("row {i} is not a JSON object")))?;

        for column in REQUIRED_COLUMNS {
            if !obj.contains_key(column) {
                return Err(missing_column(path, column));
            }
        }

        let text_field = |key: &str| -> Result<String> {
            match &obj[key] {
                JsonValue::String(s) => Ok(s.clone()),
                other => Err(ChartError::load(
                    path,
                    format!("row {i}: '{key}' is not a string: {other}"),
                )),
            }
        };

        let value = obj["value"].as_f64().ok_or_else(|| {
            ChartError::load(path, format!("row {i}: 'value' is not a number"))
        })?;
        let value = finite(path, value, &format!("row {i}"))?;

        records.push(Record {
            region: text_field("region")?,
            country: text_field("country")?,
            industry: text_field("industry")?,
            value,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with `region`, `country`, `industry` string columns and a
/// numeric `value` column. Works with files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| ChartError::load(path, format!("reading parquet metadata: {e}")))?;

    let schema = builder.schema().clone();
    let mut indices = [0usize; 4];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = schema
            .index_of(column)
            .map_err(|_| missing_column(path, column))?;
    }
    let [region_idx, country_idx, industry_idx, value_idx] = indices;

    let reader = builder
        .build()
        .map_err(|e| ChartError::load(path, format!("building parquet reader: {e}")))?;

    let mut records = Vec::new();
    let mut offset = 0;
    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| ChartError::load(path, format!("reading batch: {e}")))?;

        for row in 0..batch.num_rows() {
            let record = (|| -> anyhow::Result<Record> {
                Ok(Record {
                    region: string_at(batch.column(region_idx), row)
                        .context("column 'region'")?,
                    country: string_at(batch.column(country_idx), row)
                        .context("column 'country'")?,
                    industry: string_at(batch.column(industry_idx), row)
                        .context("column 'industry'")?,
                    value: number_at(batch.column(value_idx), row).context("column 'value'")?,
                })
            })()
            .map_err(|e| ChartError::load(path, format!("row {}: {e:#}", offset + row)))?;
            finite(path, record.value, &format!("row {}", offset + row))?;
            records.push(record);
        }
        offset += batch.num_rows();
    }

    Ok(Dataset::from_records(records))
}

// -- Arrow helpers --

fn string_at(col: &ArrayRef, row: usize) -> anyhow::Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn number_at(col: &ArrayRef, row: usize) -> anyhow::Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    };
    value.context("array type does not match its declared data type")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_row_count_matches_data_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "data.csv",
            "region,country,industry,value\n\
             US,United States,Tech & IT,20.0\n\
             US,United States,Publishing,15.0\n\
             Global,Global,Healthcare,30.0\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[2], Record::new("Global", "Global", "Healthcare", 30.0));
    }

    #[test]
    fn csv_columns_in_any_order_and_extra_columns_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "data.csv",
            "value,source,industry,country,region\n12.5,survey,All Industries,Japan,Asia\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.records(),
            &[Record::new("Asia", "Japan", "All Industries", 12.5)]
        );
    }

    #[test]
    fn header_only_csv_is_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "data.csv", "region,country,industry,value\n\n");
        let ds = load_file(&path).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ChartError::NotFound { .. }));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "data.csv", "region,country,value\nUS,United States,1\n");
        match load_file(&path).unwrap_err() {
            ChartError::Schema { column, .. } => assert_eq!(column, "industry"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_value_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "data.csv",
            "region,country,industry,value\nUS,United States,Tech & IT,lots\n",
        );
        assert!(matches!(load_file(&path).unwrap_err(), ChartError::Load { .. }));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for value in ["inf", "-inf", "NaN"] {
            let path = write_temp(
                &dir,
                "data.csv",
                &format!(
                    "region,country,industry,value\n\
                     US,United States,Publishing,15.0\n\
                     US,United States,Tech & IT,{value}\n"
                ),
            );
            match load_file(&path).unwrap_err() {
                ChartError::Load { message, .. } => {
                    assert!(message.contains("line 3"), "{message}");
                    assert!(message.contains("not a finite number"), "{message}");
                }
                other => panic!("unexpected error for {value}: {other}"),
            }
        }
    }

    #[test]
    fn parquet_non_finite_value_is_rejected() {
        use std::sync::Arc;

        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("region", DataType::Utf8, false),
            Field::new("country", DataType::Utf8, false),
            Field::new("industry", DataType::Utf8, false),
            Field::new("value", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["US"])),
                Arc::new(StringArray::from(vec!["United States"])),
                Arc::new(StringArray::from(vec!["Tech & IT"])),
                Arc::new(Float64Array::from(vec![f64::INFINITY])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        assert!(matches!(load_file(&path).unwrap_err(), ChartError::Load { .. }));
    }

    #[test]
    fn json_records_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "data.json",
            r#"[{"region":"US","country":"United States","industry":"Publishing","value":15}]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.records(),
            &[Record::new("US", "United States", "Publishing", 15.0)]
        );
    }

    #[test]
    fn json_missing_field_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "data.json", r#"[{"region":"US","value":1}]"#);
        assert!(matches!(load_file(&path).unwrap_err(), ChartError::Schema { .. }));
    }

    #[test]
    fn parquet_columns_are_loaded() {
        use std::sync::Arc;

        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("region", DataType::Utf8, false),
            Field::new("country", DataType::Utf8, false),
            Field::new("industry", DataType::Utf8, false),
            Field::new("value", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Asia", "US"])),
                Arc::new(StringArray::from(vec!["China", "United States"])),
                Arc::new(StringArray::from(vec!["All Industries", "Tech & IT"])),
                Arc::new(Int64Array::from(vec![40, 20])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.records(),
            &[
                Record::new("Asia", "China", "All Industries", 40.0),
                Record::new("US", "United States", "Tech & IT", 20.0),
            ]
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "data.xlsx", "");
        assert!(matches!(load_file(&path).unwrap_err(), ChartError::Load { .. }));
    }
}
