use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tera::Tera;

use crate::data::labels::apply_department_labels;
use crate::data::loader::load_file;
use crate::data::model::EmployeeTable;
use crate::predictor::Predictor;
use crate::web::templates;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Immutable context of the dashboard server. The dataset itself is re-read
/// on every request so edits to the file show up on reload.
pub struct DashboardContext {
    pub data_path: PathBuf,
    pub templates: Tera,
}

impl DashboardContext {
    pub fn new(data_path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        Ok(Self {
            data_path: data_path.into(),
            templates: templates::dashboard()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Predictor
// ---------------------------------------------------------------------------

/// Immutable context of the predictor server: dataset and model are loaded
/// once at startup and shared read-only by all requests.
pub struct PredictorContext {
    /// Dataset with department codes already replaced by labels.
    pub table: EmployeeTable,
    pub predictor: Predictor,
    pub templates: Tera,
    /// Seed for the simulated series. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Reference date for tenure and the trend window. `None` means today.
    pub as_of: Option<NaiveDate>,
}

impl PredictorContext {
    pub fn new(
        mut table: EmployeeTable,
        predictor: Predictor,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        apply_department_labels(&mut table);
        Ok(Self {
            table,
            predictor,
            templates: templates::predictor()?,
            seed,
            as_of: None,
        })
    }

    /// Pin the reference date instead of using the current day.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Load the dataset and the model artifact from disk.
    pub fn load(data: &Path, model: &Path, seed: Option<u64>) -> anyhow::Result<Self> {
        let table = load_file(data)?;
        log::info!(
            "Loaded {} employees ({} columns) from {}",
            table.len(),
            table.column_names.len(),
            data.display()
        );
        let predictor = Predictor::load(model)
            .with_context(|| format!("loading model {}", model.display()))?;
        Self::new(table, predictor, seed)
    }

    /// The reference date for this request.
    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
