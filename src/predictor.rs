//! Adapter around the pre-trained performance model.
//!
//! The artifact is a JSON linear model:
//!
//! ```json
//! {
//!   "feature_names": ["Age", "Years_At_Company", ...],
//!   "coefficients":  [0.004, 0.021, ...],
//!   "intercept": 1.37
//! }
//! ```
//!
//! It is loaded once per process and checked against
//! [`FEATURE_SPECS`](crate::features::FEATURE_SPECS): a model fit on any other
//! feature order is rejected at load time.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{FeatureError, FeatureVector, feature_names};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("reading model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model has {coefficients} coefficients for {features} features")]
    CoefficientCount { coefficients: usize, features: usize },

    /// The artifact's feature list differs from the canonical one.
    #[error("model feature order does not match: expected {expected:?}, found {found:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Serialized linear regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Check the artifact against the canonical feature list.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != self.feature_names.len() {
            return Err(ModelError::CoefficientCount {
                coefficients: self.coefficients.len(),
                features: self.feature_names.len(),
            });
        }
        let expected = feature_names();
        if self.feature_names.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(ModelError::FeatureMismatch {
                expected: expected.iter().map(|s| s.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }
        Ok(())
    }
}

/// Loaded, validated model exposing `predict`.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: LinearModel,
}

impl Predictor {
    pub fn new(model: LinearModel) -> Result<Self, ModelError> {
        model.validate()?;
        Ok(Predictor { model })
    }

    /// Read and validate the JSON artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model: LinearModel = serde_json::from_str(&text)?;
        let predictor = Predictor::new(model)?;
        log::info!(
            "Loaded performance model from {} ({} features)",
            path.display(),
            predictor.model.feature_names.len()
        );
        Ok(predictor)
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Predict a score. The vector must have exactly one value per model
    /// feature; non-finite entries are replaced by zero before inference.
    pub fn predict(&self, vector: &FeatureVector) -> Result<f64, FeatureError> {
        let expected = self.model.coefficients.len();
        if vector.len() != expected {
            return Err(FeatureError::LengthMismatch {
                expected,
                actual: vector.len(),
            });
        }
        let clean = vector.sanitized();
        Ok(self.model.intercept
            + clean
                .values
                .iter()
                .zip(&self.model.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>())
    }
}
