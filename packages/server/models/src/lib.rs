#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the house price server.
//!
//! These types define the JSON wire contract. Field names are part of
//! the public API and stay snake_case to match the clients the service
//! was deployed against. The request side reuses `HouseFeatures` from
//! the features crate directly, so only response shapes live here.

use serde::{Deserialize, Serialize};

/// Successful prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Estimated price, the model's raw output with no bounds checking.
    pub predicted_price: f64,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Service version.
    pub version: String,
}
