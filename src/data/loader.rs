use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{SurveyDataset, SurveyRecord};

/// Columns every survey file must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["salary", "years_experience", "currency"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, empty cells are missing values
/// * `.json`    – `[{ "salary": 52000, "years_experience": 3, "currency": "EUR" }, ...]`
/// * `.parquet` – numeric `salary` / `years_experience`, string `currency`
///
/// Columns other than [`REQUIRED_COLUMNS`] are kept in `column_names` only.
pub fn load_file(path: &Path) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "{}: {} rows, columns {:?}",
        path.display(),
        dataset.len(),
        dataset.column_names
    );
    Ok(dataset)
}

fn check_required_columns(columns: &[String], format: &str) -> Result<()> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            bail!("{format} missing '{required}' column");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SurveyDataset> {
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

    check_required_columns(&headers, "CSV")?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SurveyRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(SurveyDataset::new(records, headers))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented layout, the default `df.to_json(orient='records')`.
/// A key absent from a record, or `null`, is a missing value.
fn load_json(path: &Path) -> Result<SurveyDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    check_required_columns(&columns, "JSON")?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value::<SurveyRecord>(row.clone())
                .with_context(|| format!("Row {i}: invalid survey record"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SurveyDataset::new(records, columns))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// `salary` and `years_experience` may be Int32/Int64/Float32/Float64,
/// `currency` Utf8 or LargeUtf8. Nulls become missing values.
fn load_parquet(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_required_columns(&columns, "Parquet file")?;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&mut records, &batch)?;
    }

    Ok(SurveyDataset::new(records, columns))
}

/// Decode one record batch onto `records`.
///
/// Error rows are numbered from the start of the file, not the batch.
fn append_batch(records: &mut Vec<SurveyRecord>, batch: &RecordBatch) -> Result<()> {
    let salary_col = batch_column(batch, "salary")?;
    let years_col = batch_column(batch, "years_experience")?;
    let currency_col = batch_column(batch, "currency")?;

    let offset = records.len();
    records.reserve(batch.num_rows());
    for row in 0..batch.num_rows() {
        let file_row = offset + row;
        records.push(SurveyRecord {
            salary: numeric_value(salary_col, row)
                .with_context(|| format!("Row {file_row}: failed to read 'salary'"))?,
            years_experience: numeric_value(years_col, row)
                .with_context(|| format!("Row {file_row}: failed to read 'years_experience'"))?,
            currency: string_value(currency_col, row)
                .with_context(|| format!("Row {file_row}: failed to read 'currency'"))?,
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Read a numeric cell as `f64`, `None` for null.
fn numeric_value(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            arr.value(row)
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            arr.value(row) as f64
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            arr.value(row) as f64
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            arr.value(row) as f64
        }
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Read a string cell, `None` for null.
fn string_value(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(Some(arr.value(row).to_string()))
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(Some(arr.value(row).to_string()))
        }
        other => bail!("Expected a string column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_with_missing_cells() {
        let file = write_temp(
            ".csv",
            "id,salary,years_experience,currency\n\
             1,52000,3,EUR\n\
             2,,4,EUR\n\
             3,61000.5,,USD\n\
             4,70000,8,\n",
        );

        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.shape(), (4, 4));
        assert_eq!(ds.records[0], SurveyRecord::new(52000.0, 3.0, "EUR"));
        assert_eq!(ds.records[1].salary, None);
        assert_eq!(ds.records[2].salary, Some(61000.5));
        assert_eq!(ds.records[2].years_experience, None);
        assert_eq!(ds.records[3].currency, None);
    }

    #[test]
    fn test_load_csv_missing_column_fails() {
        let file = write_temp(".csv", "salary,currency\n100,EUR\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("years_experience"));
    }

    #[test]
    fn test_load_csv_non_numeric_fails() {
        let file = write_temp(".csv", "salary,years_experience,currency\nlots,3,EUR\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn test_load_json_records() {
        let file = write_temp(
            ".json",
            r#"[
                {"salary": 52000, "years_experience": 3, "currency": "EUR", "country": "DE"},
                {"salary": null, "years_experience": 7.5, "currency": "EUR"},
                {"years_experience": 1, "currency": "USD"}
            ]"#,
        );

        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.column_names,
            vec!["salary", "years_experience", "currency", "country"]
        );
        assert_eq!(ds.records[0], SurveyRecord::new(52000.0, 3.0, "EUR"));
        assert_eq!(ds.records[1].salary, None);
        assert_eq!(ds.records[2].salary, None);
    }

    #[test]
    fn test_load_json_requires_array() {
        let file = write_temp(".json", r#"{"salary": 1}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_load_parquet() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("salary", DataType::Float64, true),
            Field::new("years_experience", DataType::Int64, true),
            Field::new("currency", DataType::Utf8, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Float64Array::from(vec![Some(52000.0), None, Some(80000.0)])),
            Arc::new(Int64Array::from(vec![Some(3), Some(4), None])),
            Arc::new(StringArray::from(vec![Some("EUR"), Some("EUR"), None])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.shape(), (3, 3));
        assert_eq!(ds.records[0], SurveyRecord::new(52000.0, 3.0, "EUR"));
        assert_eq!(ds.records[1].salary, None);
        assert_eq!(ds.records[2].years_experience, None);
        assert_eq!(ds.records[2].currency, None);
    }

    #[test]
    fn test_parquet_errors_count_rows_across_batches() {
        let good_schema = Arc::new(Schema::new(vec![
            Field::new("salary", DataType::Float64, true),
            Field::new("years_experience", DataType::Int64, true),
            Field::new("currency", DataType::Utf8, true),
        ]));
        let first = RecordBatch::try_new(
            good_schema,
            vec![
                Arc::new(Float64Array::from(vec![52000.0, 61000.0])),
                Arc::new(Int64Array::from(vec![3, 8])),
                Arc::new(StringArray::from(vec!["EUR", "EUR"])),
            ],
        )
        .unwrap();

        let bad_schema = Arc::new(Schema::new(vec![
            Field::new("salary", DataType::Utf8, true),
            Field::new("years_experience", DataType::Int64, true),
            Field::new("currency", DataType::Utf8, true),
        ]));
        let second = RecordBatch::try_new(
            bad_schema,
            vec![
                Arc::new(StringArray::from(vec!["lots"])),
                Arc::new(Int64Array::from(vec![2])),
                Arc::new(StringArray::from(vec!["EUR"])),
            ],
        )
        .unwrap();

        let mut records = Vec::new();
        append_batch(&mut records, &first).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], SurveyRecord::new(61000.0, 8.0, "EUR"));

        let err = append_batch(&mut records, &second).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 2: failed to read 'salary'"), "{msg}");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
