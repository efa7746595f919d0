#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Serialized random-forest regressor loaded once at startup.
//!
//! The artifact is a JSON export of the trained forest: each tree in
//! flat-array form (one entry per node), the forest prediction being the
//! mean of the per-tree leaf values. The model is opaque to the rest of
//! the system — callers hand it a positional vector of
//! [`FEATURE_COUNT`](house_price_features::FEATURE_COUNT) floats and get
//! a price back. Structural validation happens once at load time so that
//! inference never has to bounds-check mid-traversal.

use std::path::Path;

use house_price_features::FEATURE_COUNT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or evaluating the model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file does not exist.
    #[error("Model file not found at path: {path}")]
    NotFound {
        /// Path that was checked.
        path: String,
    },

    /// Reading the artifact file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON for the expected shape.
    #[error("Failed to deserialize model: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact deserialized but is structurally inconsistent.
    #[error("Invalid model artifact: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },

    /// An input row does not match the trained feature width.
    #[error("Input row has {got} features, model expects {expected}")]
    Shape {
        /// Width of the offending row.
        got: usize,
        /// Width the model was trained on.
        expected: usize,
    },
}

/// One decision tree in flat-array form, one entry per node.
///
/// `feature[i] >= 0` marks an internal node splitting on that feature
/// index with `threshold[i]`; `feature[i] < 0` marks a leaf whose
/// prediction is `value[i]`. Node 0 is the root and child indices always
/// point past their parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Split feature index per node, or -1 for a leaf.
    pub feature: Vec<i32>,
    /// Split threshold per node (unused at leaves).
    pub threshold: Vec<f64>,
    /// Left child index per node (taken when `x[feature] <= threshold`).
    pub left: Vec<usize>,
    /// Right child index per node.
    pub right: Vec<usize>,
    /// Leaf prediction per node (unused at internal nodes).
    pub value: Vec<f64>,
}

impl DecisionTree {
    /// Evaluates the tree for one input row.
    ///
    /// NaN features fail the `<=` comparison and deterministically take
    /// the right branch, so NaN-bearing rows still reach a leaf.
    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        loop {
            node = match usize::try_from(self.feature[node]) {
                Ok(feature) if row[feature] <= self.threshold[node] => self.left[node],
                Ok(_) => self.right[node],
                Err(_) => return self.value[node],
            };
        }
    }
}

/// A pre-trained random-forest regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestModel {
    /// Feature width the forest was trained on.
    pub n_features: usize,
    /// The ensemble members.
    pub trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    /// Loads and validates the artifact from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the file is missing, unreadable, not
    /// valid JSON, or structurally inconsistent. Callers treat any of
    /// these as fatal: the service must never start serving without a
    /// usable model.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded random forest: {} trees, {} features",
            model.trees.len(),
            model.n_features
        );
        Ok(model)
    }

    /// Deserializes and validates an artifact from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if deserialization or structural
    /// validation fails.
    pub fn from_json_str(contents: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(contents)?;
        model.validate()?;
        Ok(model)
    }

    /// Checks structural invariants so traversal can index unchecked.
    fn validate(&self) -> Result<(), ModelError> {
        if self.n_features != FEATURE_COUNT {
            return Err(ModelError::Invalid {
                message: format!(
                    "model trained on {} features, this service encodes {FEATURE_COUNT}",
                    self.n_features
                ),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid {
                message: "forest has no trees".to_string(),
            });
        }
        for (i, tree) in self.trees.iter().enumerate() {
            let nodes = tree.feature.len();
            if nodes == 0 {
                return Err(ModelError::Invalid {
                    message: format!("tree {i} has no nodes"),
                });
            }
            if tree.threshold.len() != nodes
                || tree.left.len() != nodes
                || tree.right.len() != nodes
                || tree.value.len() != nodes
            {
                return Err(ModelError::Invalid {
                    message: format!("tree {i} has mismatched node array lengths"),
                });
            }
            for node in 0..nodes {
                let Ok(feature) = usize::try_from(tree.feature[node]) else {
                    continue; // leaf
                };
                if feature >= self.n_features {
                    return Err(ModelError::Invalid {
                        message: format!("tree {i} node {node} splits on feature {feature}"),
                    });
                }
                // Children must point strictly forward so traversal
                // always terminates.
                if tree.left[node] <= node
                    || tree.right[node] <= node
                    || tree.left[node] >= nodes
                    || tree.right[node] >= nodes
                {
                    return Err(ModelError::Invalid {
                        message: format!("tree {i} node {node} has invalid child indices"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Predicts one value per input row (mean over the ensemble).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Shape`] if any row does not match the
    /// trained feature width.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Predicts a single value for one input row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Shape`] if the row does not match the
    /// trained feature width.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::Shape {
                got: row.len(),
                expected: self.n_features,
            });
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.trees.len() as f64;
        let sum: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
        Ok(sum / count)
    }
}
