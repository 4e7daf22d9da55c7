//! Employee lookup by identifier and the display-only fields derived from a
//! record.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::data::labels::{DEPARTMENT_COLUMN, department_of};
use crate::data::loader::ID_COLUMN;
use crate::data::model::{EmployeeTable, Record, Value};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Employee ID {0} not found.")]
    NotFound(i64),
}

/// The single record whose `Employee_ID` equals `id`.
pub fn find(table: &EmployeeTable, id: i64) -> Result<&Record, LookupError> {
    table
        .records
        .iter()
        .find(|rec| rec.get(ID_COLUMN).and_then(Value::as_i64) == Some(id))
        .ok_or(LookupError::NotFound(id))
}

// ---------------------------------------------------------------------------
// Ordinal dates
// ---------------------------------------------------------------------------

/// English ordinal suffix of a day of month: 1st, 2nd, 3rd, 4th, 11th, 21st.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// `"1st May 2016"`
pub fn format_ordinal_date(date: NaiveDate) -> String {
    let day = date.day();
    format!("{day}{} {}", ordinal_suffix(day), date.format("%B %Y"))
}

// ---------------------------------------------------------------------------
// Derived display fields
// ---------------------------------------------------------------------------

/// What the predictor page shows about one employee. None of these fields
/// feed the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    pub id: i64,
    pub department: String,
    pub job_title: String,
    pub gender: String,
    pub age: String,
    /// Hire date with ordinal day, e.g. `"1st May 2016"`.
    pub hire_date: Option<String>,
    /// Years since hire as of the reference date, one decimal.
    pub tenure_years: Option<f64>,
    /// Approximate leave count: sick days / 365.
    pub leave_count: Option<f64>,
    pub projects_per_year: Option<f64>,
}

impl EmployeeProfile {
    /// Derive the display fields of `record`, measuring tenure up to `as_of`.
    pub fn from_record(id: i64, record: &Record, as_of: NaiveDate) -> Self {
        let text = |col: &str| match record.get(col) {
            None | Some(Value::Null) => "-".to_string(),
            Some(v) if matches!(v, Value::Float(_)) => v
                .as_i64()
                .map_or_else(|| v.to_string(), |whole| whole.to_string()),
            Some(v) => v.to_string(),
        };
        let department = record
            .get(DEPARTMENT_COLUMN)
            .and_then(department_of)
            .map(str::to_string)
            .unwrap_or_else(|| text(DEPARTMENT_COLUMN));

        let hired = record.get("Hire_Date").and_then(Value::as_date);
        let tenure_years = hired.map(|d| {
            let days = (as_of - d).num_days().max(0) as f64;
            (days / 365.25 * 10.0).round() / 10.0
        });

        Self {
            id,
            department,
            job_title: text("Job_Title"),
            gender: text("Gender"),
            age: text("Age"),
            hire_date: hired.map(format_ordinal_date),
            tenure_years,
            leave_count: record.get_f64("Sick_Days").map(|d| d / 365.0),
            projects_per_year: projects_per_year(record),
        }
    }
}

/// Projects handled per year at the company; the raw project count when the
/// employee has less than a year of tenure on record.
fn projects_per_year(record: &Record) -> Option<f64> {
    let projects = record.get_f64("Projects_Handled")?;
    match record.get_f64("Years_At_Company") {
        Some(years) if years > 0.0 => Some(projects / years),
        _ => Some(projects),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> EmployeeTable {
        let rows = [(1, 3, "2016-05-01"), (2, 0, "2020-01-22"), (5, 8, "2012-12-03")];
        let records = rows
            .iter()
            .map(|(id, dept, hired)| {
                let mut r = Record::default();
                r.insert(ID_COLUMN, Value::Integer(*id));
                r.insert(DEPARTMENT_COLUMN, Value::Integer(*dept));
                r.insert("Hire_Date", Value::String(hired.to_string()));
                r.insert("Sick_Days", Value::Integer(73));
                r.insert("Projects_Handled", Value::Integer(12));
                r.insert("Years_At_Company", Value::Integer(4));
                r.insert("Job_Title", Value::String("Engineer".into()));
                r
            })
            .collect();
        EmployeeTable::new(
            vec![ID_COLUMN.into(), DEPARTMENT_COLUMN.into(), "Hire_Date".into()],
            records,
        )
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (20, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
        for day in 11..=20 {
            assert_eq!(ordinal_suffix(day), "th", "day {day}");
        }
    }

    #[test]
    fn ordinal_date_format() {
        assert_eq!(format_ordinal_date(date(2016, 5, 1)), "1st May 2016");
        assert_eq!(format_ordinal_date(date(2020, 1, 22)), "22nd January 2020");
        assert_eq!(format_ordinal_date(date(2012, 12, 13)), "13th December 2012");
    }

    #[test]
    fn every_present_id_is_found_once() {
        let t = table();
        for id in [1, 2, 5] {
            let rec = find(&t, id).unwrap();
            assert_eq!(rec.get(ID_COLUMN), Some(&Value::Integer(id)));
        }
    }

    #[test]
    fn absent_ids_are_not_found() {
        let t = table();
        for id in [0, 3, -1, i64::MAX] {
            assert_eq!(find(&t, id), Err(LookupError::NotFound(id)));
        }
        assert_eq!(
            LookupError::NotFound(3).to_string(),
            "Employee ID 3 not found."
        );
    }

    #[test]
    fn profile_derives_display_fields() {
        let t = table();
        let rec = find(&t, 1).unwrap();
        let p = EmployeeProfile::from_record(1, rec, date(2026, 5, 1));

        assert_eq!(p.department, "Engineering");
        assert_eq!(p.hire_date.as_deref(), Some("1st May 2016"));
        assert_eq!(p.tenure_years, Some(10.0));
        assert_eq!(p.leave_count, Some(0.2));
        assert_eq!(p.projects_per_year, Some(3.0));
        assert_eq!(p.job_title, "Engineer");
        assert_eq!(p.gender, "-");
    }

    #[test]
    fn whole_number_floats_display_without_decimals() {
        let mut r = Record::default();
        r.insert("Age", Value::Float(29.0));
        r.insert("Job_Title", Value::Float(2.5));
        r.insert("Gender", Value::Null);
        let p = EmployeeProfile::from_record(9, &r, date(2024, 1, 1));
        assert_eq!(p.age, "29");
        assert_eq!(p.job_title, "2.50");
        assert_eq!(p.gender, "-");
        assert_eq!(p.department, "-");
    }

    #[test]
    fn projects_per_year_falls_back_without_tenure() {
        let mut r = Record::default();
        r.insert("Projects_Handled", Value::Integer(5));
        r.insert("Years_At_Company", Value::Integer(0));
        assert_eq!(projects_per_year(&r), Some(5.0));
    }
}
