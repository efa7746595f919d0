//! HTTP handler functions for the house price API.

use actix_web::{HttpResponse, web};
use house_price_features::HouseFeatures;
use house_price_server_models::{ApiHealth, PredictionResponse};

use crate::AppState;

/// `GET /health`
///
/// Liveness only: touches no model state, so it behaves identically
/// whether called before or after the model has loaded.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /predict`
///
/// The JSON body is deserialized into [`HouseFeatures`] by the extractor;
/// a missing required field or wrong type is rejected there with a 400
/// before the encoder or model is ever touched. Encoding or inference
/// failures surface as a 500 with a human-readable cause.
pub async fn predict(state: web::Data<AppState>, record: web::Json<HouseFeatures>) -> HttpResponse {
    match state.service.predict(&record) {
        Ok(predicted_price) => HttpResponse::Ok().json(PredictionResponse { predicted_price }),
        Err(e) => {
            log::error!("Prediction failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}
