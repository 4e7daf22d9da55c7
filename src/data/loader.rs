use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Date32Array, Float32Array, Float64Array, Int32Array,
    Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{EmployeeTable, Record, Value, parse_date};

/// Column holding the unique employee identifier.
pub const ID_COLUMN: &str = "Employee_ID";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the employee table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one employee per line (recommended)
/// * `.json`    – `[{ "Employee_ID": 1, "Department": 3, ... }, ...]`
/// * `.parquet` – flat scalar columns, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<EmployeeTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    check_unique_ids(&table)?;
    log::debug!(
        "Loaded {} employees with columns {:?}",
        table.len(),
        table.column_names
    );
    Ok(table)
}

/// The identifier must be unique within one snapshot of the dataset.
fn check_unique_ids(table: &EmployeeTable) -> Result<()> {
    if !table.has_column(ID_COLUMN) {
        return Ok(());
    }
    let mut seen = HashSet::with_capacity(table.len());
    for (row, rec) in table.records.iter().enumerate() {
        if let Some(id) = rec.get(ID_COLUMN).and_then(Value::as_i64) {
            if !seen.insert(id) {
                bail!("Row {row}: duplicate {ID_COLUMN} {id}");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one employee per row.
/// Cell types are guessed per cell (integer, float, bool, date, text).
fn load_csv(path: &Path) -> Result<EmployeeTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(col, cell)| (col.clone(), guess_value_type(cell)))
            .collect();

        records.push(record);
    }

    Ok(EmployeeTable::new(headers, records))
}

fn guess_value_type(s: &str) -> Value {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    match s {
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        _ => {}
    }
    if let Some(d) = parse_date(s) {
        return Value::Date(d);
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Employee_ID": 1, "Department": 3, "Hire_Date": "2016-05-01", ... },
///   ...
/// ]
/// ```
///
/// Column order is the key order of the first record, followed by keys that
/// only appear in later records.
fn load_json(path: &Path) -> Result<EmployeeTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut record = Record::default();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            record.insert(key.clone(), json_to_value(val));
        }
        records.push(record);
    }

    Ok(EmployeeTable::new(column_names, records))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => match parse_date(s) {
            Some(d) => Value::Date(d),
            None => Value::String(s.clone()),
        },
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per employee attribute.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<EmployeeTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let record: Record = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(col_idx, field)| {
                    let value = extract_value(batch.column(col_idx), row);
                    (field.name().clone(), value)
                })
                .collect();
            records.push(record);
        }
    }

    Ok(EmployeeTable::new(column_names, records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| Value::String(s.value(row).to_string())),
        DataType::LargeUtf8 => Some(Value::String(
            col.as_string::<i64>().value(row).to_string(),
        )),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| Value::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| Value::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| Value::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| Value::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| Value::Bool(a.value(row))),
        DataType::Date32 => any
            .downcast_ref::<Date32Array>()
            .and_then(|a| a.value_as_date(row))
            .map(Value::Date),
        _ => None,
    };
    value.unwrap_or_else(|| Value::String(format!("{:?}", col.data_type())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_cells_are_typed_and_columns_keep_file_order() {
        let file = write_temp(
            ".csv",
            "Employee_ID,Department,Score,Hire_Date,Resigned,Job_Title\n\
             1,3,4.5,2016-05-01,False,Engineer\n\
             2,0,,2019-01-21 10:00:00.0,True,Analyst\n",
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(
            table.column_names,
            vec!["Employee_ID", "Department", "Score", "Hire_Date", "Resigned", "Job_Title"]
        );
        let first = &table.records[0];
        assert_eq!(first.get("Department"), Some(&Value::Integer(3)));
        assert_eq!(first.get("Score"), Some(&Value::Float(4.5)));
        assert!(matches!(first.get("Hire_Date"), Some(Value::Date(_))));
        assert_eq!(first.get("Resigned"), Some(&Value::Bool(false)));
        assert_eq!(
            first.get("Job_Title"),
            Some(&Value::String("Engineer".into()))
        );
        assert_eq!(table.records[1].get("Score"), Some(&Value::Null));
        assert!(matches!(table.records[1].get("Hire_Date"), Some(Value::Date(_))));
    }

    #[test]
    fn json_records_load() {
        let file = write_temp(
            ".json",
            r#"[{"Employee_ID": 7, "Department": 3, "Score": 2.5},
                {"Employee_ID": 8, "Department": 1, "Score": null}]"#,
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names, vec!["Employee_ID", "Department", "Score"]);
        assert_eq!(table.records[1].get("Score"), Some(&Value::Null));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let file = write_temp(".csv", "Employee_ID,Age\n1,30\n1,31\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate Employee_ID 1"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }

    #[test]
    fn parquet_columns_are_typed_and_keep_schema_order() {
        use arrow::array::{ArrayRef, LargeStringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use chrono::NaiveDate;
        use parquet::arrow::ArrowWriter;

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let hired = NaiveDate::from_ymd_opt(2016, 5, 1).unwrap();
        let hired_days = (hired - epoch).num_days() as i32;

        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1, 2])),
            Arc::new(Float64Array::from(vec![Some(4.5), None])),
            Arc::new(StringArray::from(vec!["Engineer", "Analyst"])),
            Arc::new(Date32Array::from(vec![Some(hired_days), None])),
            Arc::new(Float32Array::from(vec![0.5_f32, 1.25])),
            Arc::new(LargeStringArray::from(vec!["Female", "Male"])),
        ];
        let schema = Arc::new(Schema::new(vec![
            Field::new("Employee_ID", DataType::Int64, false),
            Field::new("Score", DataType::Float64, true),
            Field::new("Job_Title", DataType::Utf8, false),
            Field::new("Hire_Date", DataType::Date32, true),
            Field::new("Ratio", DataType::Float32, false),
            Field::new("Gender", DataType::LargeUtf8, false),
        ]));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(
            table.column_names,
            vec!["Employee_ID", "Score", "Job_Title", "Hire_Date", "Ratio", "Gender"]
        );
        assert_eq!(table.len(), 2);

        let first = &table.records[0];
        assert_eq!(first.get("Employee_ID"), Some(&Value::Integer(1)));
        assert_eq!(first.get("Score"), Some(&Value::Float(4.5)));
        assert_eq!(first.get("Job_Title"), Some(&Value::String("Engineer".into())));
        assert_eq!(first.get("Hire_Date"), Some(&Value::Date(hired)));
        assert_eq!(first.get("Ratio"), Some(&Value::Float(0.5)));
        assert_eq!(first.get("Gender"), Some(&Value::String("Female".into())));

        let second = &table.records[1];
        assert_eq!(second.get("Score"), Some(&Value::Null));
        assert_eq!(second.get("Hire_Date"), Some(&Value::Null));
        assert_eq!(second.get("Ratio"), Some(&Value::Float(1.25)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_file(Path::new("/nonexistent/employees.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/employees.csv"));
    }
}
