#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for house price prediction.
//!
//! Serves two endpoints: `GET /health` for liveness and `POST /predict`
//! for price estimates. The model artifact is loaded exactly once during
//! startup; a load failure is fatal and the server never binds. After
//! startup every request is an independent, stateless computation over
//! the shared read-only [`PredictionService`].

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use house_price_model::RandomForestModel;
use house_price_prediction::PredictionService;

/// Default location of the model artifact, relative to the working
/// directory. Override with the `MODEL_PATH` environment variable.
pub const DEFAULT_MODEL_PATH: &str = "data/random_forest_model.json";

/// Shared application state.
pub struct AppState {
    /// The prediction service, constructed once at startup and read-only
    /// thereafter. No locking: no writer exists after initialization.
    pub service: Arc<PredictionService>,
}

/// Starts the house price API server.
///
/// Loads the model artifact, constructs the [`PredictionService`], and
/// binds the Actix-Web HTTP server. This is a regular async function —
/// the caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the model artifact is missing or fails to deserialize. The
/// service must never reach the ready state without a model, so startup
/// aborts here.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());
    log::info!("Loading model from {model_path}...");
    let model = RandomForestModel::load(Path::new(&model_path)).expect("Failed to load the model");

    let state = web::Data::new(AppState {
        service: Arc::new(PredictionService::new(model)),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/predict", web::post().to(handlers::predict))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
