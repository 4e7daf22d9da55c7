/// Data layer: core types, loading, label mapping and statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmployeeTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ EmployeeTable  │  Vec<Record>, column order
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  labels   │  department codes → labels, per-department means
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  correlation ranking, quartiles, OLS, histograms
///   └──────────┘
/// ```

pub mod labels;
pub mod loader;
pub mod model;
pub mod stats;
