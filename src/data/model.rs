use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Value – a single cell of the employee table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Grouping downstream uses `BTreeMap`, so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

// -- Manual Eq/Ord so we can group by Value --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.2}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Null => write!(f, "-"),
        }
    }
}

impl Value {
    /// Interpret the value as an `f64` (integers and floats only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as an integer identifier.
    ///
    /// Floats with no fractional part are accepted because Pandas writes
    /// integer columns containing nulls as floats.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Interpret the value as a calendar date. Strings are parsed with
    /// [`parse_date`].
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::String(s) => parse_date(s),
            _ => None,
        }
    }
}

/// Accepted textual date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse an ISO date (optionally with a time part, which is dropped) or a
/// `dd/mm/yyyy` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|fmt| {
                chrono::NaiveDateTime::parse_from_str(s, fmt)
                    .ok()
                    .map(|dt| dt.date())
            })
        })
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single employee row: column name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub values: BTreeMap<String, Value>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            values: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The parsed dataset. Column names keep the order of the source file, which
/// is the "natural" order used to break ties when ranking columns.
#[derive(Debug, Clone, Default)]
pub struct EmployeeTable {
    /// All rows.
    pub records: Vec<Record>,
    /// Column names in source order.
    pub column_names: Vec<String>,
}

impl EmployeeTable {
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        EmployeeTable {
            records,
            column_names,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// A column is numeric when it exists, holds at least one non-null value
    /// and every non-null value is an integer or a float. Booleans do not
    /// count, matching `select_dtypes(include=number)`.
    pub fn is_numeric_column(&self, column: &str) -> bool {
        if !self.has_column(column) {
            return false;
        }
        let mut seen = false;
        for rec in &self.records {
            match rec.get(column) {
                None | Some(Value::Null) => {}
                Some(v) if v.is_numeric() => seen = true,
                Some(_) => return false,
            }
        }
        seen
    }

    /// Names of all numeric columns, in source order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.column_names
            .iter()
            .filter(|c| self.is_numeric_column(c))
            .map(String::as_str)
            .collect()
    }

    /// Per-row numeric view of a column; `None` for nulls and missing cells.
    /// Returns `None` if the column is absent or not numeric.
    pub fn numeric_column(&self, column: &str) -> Option<Vec<Option<f64>>> {
        if !self.is_numeric_column(column) {
            return None;
        }
        Some(
            self.records
                .iter()
                .map(|rec| rec.get_f64(column))
                .collect(),
        )
    }

    /// Like [`numeric_column`](Self::numeric_column) with nulls dropped.
    pub fn numeric_values(&self, column: &str) -> Option<Vec<f64>> {
        self.numeric_column(column)
            .map(|vals| vals.into_iter().flatten().collect())
    }

    /// Rows where both columns hold numbers, as `(x, y)` pairs.
    pub fn numeric_pairs(&self, x: &str, y: &str) -> Option<Vec<(f64, f64)>> {
        let xs = self.numeric_column(x)?;
        let ys = self.numeric_column(y)?;
        Some(
            xs.into_iter()
                .zip(ys)
                .filter_map(|(a, b)| Some((a?, b?)))
                .collect(),
        )
    }
}
