#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Prediction service owning the loaded model.
//!
//! [`PredictionService`] is constructed exactly once during startup,
//! after the model artifact has loaded, and is shared read-only across
//! request workers from then on. Constructing it is the only transition
//! from "not serving" to "serving": there is no way to reach a service
//! value without a loaded model, and no way to swap the model afterward.
//! Every `predict` call is an independent, stateless computation.

use house_price_features::{HouseFeatures, encode};
use house_price_model::{ModelError, RandomForestModel};
use thiserror::Error;

/// Error surfaced to callers when a prediction cannot be produced.
///
/// Encoding and inference failures are normalized into this single shape
/// carrying a human-readable cause; internal error types never cross the
/// service boundary.
#[derive(Debug, Error)]
#[error("An error occurred during prediction: {message}")]
pub struct PredictionError {
    /// Human-readable cause.
    pub message: String,
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// The prediction service: an immutable wrapper around the loaded model.
#[derive(Debug)]
pub struct PredictionService {
    model: RandomForestModel,
}

impl PredictionService {
    /// Wraps a loaded model. This is the Uninitialized→Ready transition;
    /// load failures happen before this point and are fatal.
    #[must_use]
    pub const fn new(model: RandomForestModel) -> Self {
        Self { model }
    }

    /// Predicts a price for one raw feature record.
    ///
    /// Encodes the record into the model's positional vector and runs
    /// inference. The raw model output is returned without bounds
    /// checking. No retries, no caching.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError`] if inference fails (e.g. an internal
    /// shape mismatch). Field-level validation happens upstream at the
    /// transport boundary and never reaches this method.
    pub fn predict(&self, record: &HouseFeatures) -> Result<f64, PredictionError> {
        let vector = encode(record);
        let price = self.model.predict_row(&vector)?;
        log::debug!("Predicted {price} for {}", record.ocean_proximity);
        Ok(price)
    }
}
