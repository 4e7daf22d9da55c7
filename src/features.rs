//! The canonical, ordered feature list the performance model is fit on, and
//! assembly of a [`FeatureVector`] from one employee record.

use thiserror::Error;

use crate::data::labels::{DEPARTMENT_COLUMN, department_of};
use crate::data::model::{Record, Value};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    /// Source columns required by the feature list are absent from the record.
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("feature vector has {actual} values, the model expects {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Where a feature's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    /// A numeric column taken as is.
    Column(&'static str),
    /// `numerator / denominator`. Division by zero yields a non-finite value,
    /// which inference later zeroes.
    Ratio {
        numerator: &'static str,
        denominator: &'static str,
    },
    /// `1.0` when the categorical column equals `value`, else `0.0`.
    OneHot {
        column: &'static str,
        value: &'static str,
    },
}

impl FeatureSource {
    /// Columns of the record this feature reads.
    pub fn columns(&self) -> Vec<&'static str> {
        match *self {
            FeatureSource::Column(c) => vec![c],
            FeatureSource::Ratio {
                numerator,
                denominator,
            } => vec![numerator, denominator],
            FeatureSource::OneHot { column, .. } => vec![column],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub source: FeatureSource,
}

const fn column(name: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        source: FeatureSource::Column(name),
    }
}

const fn one_hot(name: &'static str, column: &'static str, value: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        source: FeatureSource::OneHot { column, value },
    }
}

/// The single canonical feature order. A model artifact must list exactly
/// these names in exactly this order.
pub const FEATURE_SPECS: &[FeatureSpec] = &[
    column("Age"),
    column("Years_At_Company"),
    column("Monthly_Salary"),
    column("Work_Hours_Per_Week"),
    column("Projects_Handled"),
    column("Overtime_Hours"),
    column("Sick_Days"),
    column("Remote_Work_Frequency"),
    column("Team_Size"),
    column("Training_Hours"),
    column("Promotions"),
    column("Employee_Satisfaction_Score"),
    FeatureSpec {
        name: "Overtime_Ratio",
        source: FeatureSource::Ratio {
            numerator: "Overtime_Hours",
            denominator: "Work_Hours_Per_Week",
        },
    },
    FeatureSpec {
        name: "Projects_Per_Year",
        source: FeatureSource::Ratio {
            numerator: "Projects_Handled",
            denominator: "Years_At_Company",
        },
    },
    one_hot("Department_IT", DEPARTMENT_COLUMN, "IT"),
    one_hot("Department_Finance", DEPARTMENT_COLUMN, "Finance"),
    one_hot("Department_Customer_Support", DEPARTMENT_COLUMN, "Customer Support"),
    one_hot("Department_Engineering", DEPARTMENT_COLUMN, "Engineering"),
    one_hot("Department_Marketing", DEPARTMENT_COLUMN, "Marketing"),
    one_hot("Department_HR", DEPARTMENT_COLUMN, "HR"),
    one_hot("Department_Operation", DEPARTMENT_COLUMN, "Operation"),
    one_hot("Department_Sales", DEPARTMENT_COLUMN, "Sales"),
    one_hot("Department_Legal", DEPARTMENT_COLUMN, "Legal"),
    one_hot("Gender_Female", "Gender", "Female"),
    one_hot("Gender_Male", "Gender", "Male"),
    one_hot("Gender_Other", "Gender", "Other"),
];

pub const FEATURE_COUNT: usize = FEATURE_SPECS.len();

pub fn feature_names() -> Vec<&'static str> {
    FEATURE_SPECS.iter().map(|f| f.name).collect()
}

/// Record columns the feature list reads, deduplicated, in feature order.
pub fn required_columns() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for col in FEATURE_SPECS.iter().flat_map(|f| f.source.columns()) {
        if !out.contains(&col) {
            out.push(col);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// FeatureVector
// ---------------------------------------------------------------------------

/// Model input in [`FEATURE_SPECS`] order. May contain non-finite values
/// until [`sanitized`](Self::sanitized).
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Assemble the feature vector of one employee. Every required column must
    /// be present; nulls and non-numeric cells become NaN.
    pub fn from_record(record: &Record) -> Result<Self, FeatureError> {
        let missing: Vec<String> = required_columns()
            .into_iter()
            .filter(|c| !record.contains(c))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(FeatureError::MissingColumns(missing));
        }

        let values = FEATURE_SPECS
            .iter()
            .map(|spec| feature_value(record, &spec.source))
            .collect();
        Ok(FeatureVector { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy with every infinite or NaN entry replaced by `0.0`. Lossy; finite
    /// entries are unchanged.
    pub fn sanitized(&self) -> FeatureVector {
        FeatureVector {
            values: self
                .values
                .iter()
                .map(|v| if v.is_finite() { *v } else { 0.0 })
                .collect(),
        }
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        FeatureVector { values }
    }
}

fn feature_value(record: &Record, source: &FeatureSource) -> f64 {
    let num = |c: &str| record.get_f64(c).unwrap_or(f64::NAN);
    match *source {
        FeatureSource::Column(c) => num(c),
        FeatureSource::Ratio {
            numerator,
            denominator,
        } => num(numerator) / num(denominator),
        FeatureSource::OneHot { column, value } => {
            let matches = record
                .get(column)
                .and_then(|v| category(column, v))
                .is_some_and(|cat| cat == value);
            if matches { 1.0 } else { 0.0 }
        }
    }
}

/// Categorical reading of a cell; department codes resolve to labels.
fn category<'a>(column: &str, value: &'a Value) -> Option<&'a str> {
    if column == DEPARTMENT_COLUMN {
        department_of(value)
    } else if let Value::String(s) = value {
        Some(s.as_str())
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn complete_record() -> Record {
        let mut r = Record::default();
        for (i, col) in required_columns().into_iter().enumerate() {
            r.insert(col, Value::Float(i as f64 + 1.0));
        }
        r.insert(DEPARTMENT_COLUMN, Value::Integer(3));
        r.insert("Gender", Value::String("Female".into()));
        r.insert("Overtime_Hours", Value::Integer(10));
        r.insert("Work_Hours_Per_Week", Value::Integer(40));
        r
    }

    fn value_of(v: &FeatureVector, name: &str) -> f64 {
        let idx = feature_names().iter().position(|n| *n == name).unwrap();
        v.values[idx]
    }

    #[test]
    fn names_are_unique_and_count_matches() {
        let names = feature_names();
        assert_eq!(names.len(), FEATURE_COUNT);
        for (i, n) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(n), "duplicate feature {n}");
        }
    }

    #[test]
    fn required_columns_are_deduplicated() {
        let cols = required_columns();
        assert_eq!(cols.iter().filter(|c| **c == "Overtime_Hours").count(), 1);
        assert!(cols.contains(&DEPARTMENT_COLUMN));
        assert!(cols.contains(&"Gender"));
        assert_eq!(cols.len(), 14);
    }

    #[test]
    fn vector_follows_canonical_order() {
        let v = FeatureVector::from_record(&complete_record()).unwrap();
        assert_eq!(v.len(), FEATURE_COUNT);
        assert_eq!(value_of(&v, "Overtime_Ratio"), 0.25);
        assert_eq!(value_of(&v, "Department_Engineering"), 1.0);
        assert_eq!(value_of(&v, "Department_IT"), 0.0);
        assert_eq!(value_of(&v, "Gender_Female"), 1.0);
        assert_eq!(value_of(&v, "Gender_Male"), 0.0);
    }

    #[test]
    fn labelled_department_is_one_hot_encoded_too() {
        let mut r = complete_record();
        r.insert(DEPARTMENT_COLUMN, Value::String("Engineering".into()));
        let v = FeatureVector::from_record(&r).unwrap();
        assert_eq!(value_of(&v, "Department_Engineering"), 1.0);
    }

    #[test]
    fn missing_columns_are_listed_exactly() {
        let mut r = complete_record();
        r.values.remove("Sick_Days");
        r.values.remove("Gender");
        let err = FeatureVector::from_record(&r).unwrap_err();
        assert_eq!(
            err,
            FeatureError::MissingColumns(vec!["Sick_Days".into(), "Gender".into()])
        );
        assert_eq!(err.to_string(), "Missing columns: Sick_Days, Gender");
    }

    #[test]
    fn zero_denominator_is_zeroed_by_sanitisation() {
        let mut r = complete_record();
        r.insert("Years_At_Company", Value::Integer(0));
        let v = FeatureVector::from_record(&r).unwrap();
        assert!(value_of(&v, "Projects_Per_Year").is_infinite());
        assert_eq!(value_of(&v.sanitized(), "Projects_Per_Year"), 0.0);
    }

    #[test]
    fn sanitisation_zeroes_only_non_finite_positions() {
        let v = FeatureVector::from(vec![1.5, f64::INFINITY, -2.0, f64::NAN, f64::NEG_INFINITY, 0.0]);
        assert_eq!(v.sanitized().values, vec![1.5, 0.0, -2.0, 0.0, 0.0, 0.0]);
    }
}
