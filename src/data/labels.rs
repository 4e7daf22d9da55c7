use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{EmployeeTable, Value};

pub const DEPARTMENT_COLUMN: &str = "Department";

/// Department labels indexed by the integer code stored in the dataset.
pub const DEPARTMENT_LABELS: [&str; 9] = [
    "IT",
    "Finance",
    "Customer Support",
    "Engineering",
    "Marketing",
    "HR",
    "Operation",
    "Sales",
    "Legal",
];

/// Label for a department code, if the code is known.
pub fn department_label(code: i64) -> Option<&'static str> {
    usize::try_from(code)
        .ok()
        .and_then(|i| DEPARTMENT_LABELS.get(i))
        .copied()
}

/// Resolve a department cell to its label. Cells that already hold a label
/// are returned as is; unknown codes yield `None`.
pub fn department_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        other => other.as_i64().and_then(department_label),
    }
}

/// Replace known department codes with their labels in place.
/// Unknown codes and non-numeric cells are left untouched.
pub fn apply_department_labels(table: &mut EmployeeTable) {
    for rec in &mut table.records {
        if let Some(cell) = rec.values.get_mut(DEPARTMENT_COLUMN) {
            if let Some(label) = cell.as_i64().and_then(department_label) {
                *cell = Value::String(label.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Department performance table
// ---------------------------------------------------------------------------

/// One row of the per-department summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentScore {
    pub department: String,
    pub mean_score: f64,
    pub employees: usize,
}

/// Mean of `score_column` per department, sorted by department.
/// Rows with a missing department or score are skipped.
pub fn department_means(table: &EmployeeTable, score_column: &str) -> Vec<DepartmentScore> {
    let mut groups: BTreeMap<&Value, (f64, usize)> = BTreeMap::new();
    for rec in &table.records {
        let (Some(dept), Some(score)) = (rec.get(DEPARTMENT_COLUMN), rec.get_f64(score_column))
        else {
            continue;
        };
        if dept.is_null() {
            continue;
        }
        let entry = groups.entry(dept).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(dept, (sum, n))| DepartmentScore {
            department: dept.to_string(),
            mean_score: sum / n as f64,
            employees: n,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn table(rows: &[(Value, f64)]) -> EmployeeTable {
        let records = rows
            .iter()
            .map(|(dept, score)| {
                let mut r = Record::default();
                r.insert(DEPARTMENT_COLUMN, dept.clone());
                r.insert("Performance_Score", Value::Float(*score));
                r
            })
            .collect();
        EmployeeTable::new(
            vec![DEPARTMENT_COLUMN.into(), "Performance_Score".into()],
            records,
        )
    }

    #[test]
    fn code_three_is_engineering() {
        assert_eq!(department_label(3), Some("Engineering"));
        assert_eq!(department_of(&Value::Integer(3)), Some("Engineering"));
        assert_eq!(department_of(&Value::Float(3.0)), Some("Engineering"));
        assert_eq!(department_label(9), None);
        assert_eq!(department_label(-1), None);
    }

    #[test]
    fn labels_replace_known_codes_only() {
        let mut t = table(&[(Value::Integer(3), 4.0), (Value::Integer(42), 2.0)]);
        apply_department_labels(&mut t);
        assert_eq!(
            t.records[0].get(DEPARTMENT_COLUMN),
            Some(&Value::String("Engineering".into()))
        );
        assert_eq!(t.records[1].get(DEPARTMENT_COLUMN), Some(&Value::Integer(42)));
    }

    #[test]
    fn means_are_grouped_and_sorted_by_label() {
        let mut t = table(&[
            (Value::Integer(5), 2.0),
            (Value::Integer(0), 4.0),
            (Value::Integer(5), 3.0),
        ]);
        apply_department_labels(&mut t);
        let means = department_means(&t, "Performance_Score");
        assert_eq!(
            means,
            vec![
                DepartmentScore {
                    department: "HR".into(),
                    mean_score: 2.5,
                    employees: 2
                },
                DepartmentScore {
                    department: "IT".into(),
                    mean_score: 4.0,
                    employees: 1
                },
            ]
        );
    }
}
