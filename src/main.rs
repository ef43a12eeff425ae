mod csv_input;
mod encoder;
mod error;
mod features;
mod forecast;
mod handlers;
mod inference;
mod models;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use encoder::OneHotEncoder;
use inference::{OnnxStockModel, StockModel};

/// Frontend dev servers allowed to call the API cross-origin.
const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:5174"];

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let model_path = std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| "models/xgb_inventory_model.onnx".to_string());
    let encoder_path =
        std::env::var("ENCODER_PATH").unwrap_or_else(|_| "models/onehot_encoder.json".to_string());

    let encoder = match OneHotEncoder::load(&encoder_path) {
        Ok(encoder) => {
            info!(
                "loaded one-hot encoder from {encoder_path} ({} categories)",
                encoder.width()
            );
            encoder
        }
        Err(e) => {
            error!("failed to load encoder from {encoder_path}: {e:#}");
            panic!("cannot start without the encoder artifact");
        }
    };

    let input_width = forecast::NUMERIC_COLUMNS.len() + encoder.width();
    let model: Arc<dyn StockModel> = match OnnxStockModel::load(&model_path, input_width) {
        Ok(model) => {
            info!("loaded ONNX model from {model_path} (input width {input_width})");
            Arc::new(model)
        }
        Err(e) => {
            error!("failed to load model from {model_path}: {e:#}");
            panic!("cannot start without the model artifact");
        }
    };

    let model_data = web::Data::new(model);
    let encoder_data = web::Data::new(encoder);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let workers = std::env::var("WORKERS")
        .map(|w| w.parse().unwrap_or(num_cpus::get()))
        .unwrap_or_else(|_| num_cpus::get());
    let bind_address = format!("{host}:{port}");

    info!("starting inventory forecast API on http://{bind_address}");
    info!("   GET  /health       - liveness check");
    info!("   GET  /model-info   - model and encoder summary");
    info!("   POST /uploadfile/  - CSV upload, 10-day stock forecast");

    HttpServer::new(move || {
        let cors = ALLOWED_ORIGINS
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(model_data.clone())
            .app_data(encoder_data.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/model-info", web::get().to(handlers::model_info))
            .route("/uploadfile/", web::post().to(handlers::upload_file))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
