use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use remote_work_charts::config::DEFAULT_INPUT;
use remote_work_charts::data::model::Record;

/// (region, country, industry, value)
const ROWS: [(&str, &str, &str, f64); 24] = [
    // US industries: percentage-point increase in remote postings
    ("US", "United States", "Tech & IT", 21.4),
    ("US", "United States", "Publishing", 17.8),
    ("US", "United States", "Data Processing", 16.9),
    ("US", "United States", "Insurance Carriers", 12.3),
    ("US", "United States", "Securities & Futures", 11.7),
    ("US", "United States", "Funds & Trusts", 10.2),
    ("US", "United States", "Management Companies", 9.6),
    ("US", "United States", "Federal Reserve Banks", 8.9),
    ("US", "United States", "Broadcasting & Telecom", 8.1),
    ("US", "United States", "Professional Services", 7.4),
    // Global industries: year-over-year growth in remote roles
    ("Global", "Global", "Software Development", 35.0),
    ("Global", "Global", "Marketing", 28.0),
    ("Global", "Global", "Customer Support", 24.0),
    ("Global", "Global", "Finance", 19.0),
    ("Global", "Global", "Healthcare Admin", 15.0),
    ("Global", "Global", "All Industries", 22.0),
    // Regional aggregates
    ("Latin America", "Colombia", "All Industries", 12.5),
    ("Latin America", "Argentina", "All Industries", 9.8),
    ("Europe", "European Union", "All Industries", 8.4),
    ("Europe", "Sweden", "All Industries", 6.1),
    ("Europe", "Ireland", "All Industries", 7.3),
    // Asia policy survey: share of firms with a remote policy
    ("Asia", "Singapore", "All Industries", 44.0),
    ("Asia", "Japan", "All Industries", 31.0),
    ("Asia", "China", "All Industries", 38.0),
];

fn records() -> Vec<Record> {
    ROWS.iter()
        .map(|&(region, country, industry, value)| Record::new(region, country, industry, value))
        .collect()
}

fn write_csv(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    let column = |f: fn(&Record) -> &str| {
        StringArray::from(records.iter().map(f).collect::<Vec<_>>())
    };
    let region = column(|r| r.region.as_str());
    let country = column(|r| r.country.as_str());
    let industry = column(|r| r.industry.as_str());
    let value = Float64Array::from(records.iter().map(|r| r.value).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("region", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("industry", DataType::Utf8, false),
        Field::new("value", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(region),
            Arc::new(country),
            Arc::new(industry),
            Arc::new(value),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let records = records();

    match output_path.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(&output_path, &records),
        _ => write_csv(&output_path, &records),
    }
    .with_context(|| format!("writing {}", output_path.display()))?;

    println!("Wrote {} rows to {}", records.len(), output_path.display());
    Ok(())
}
