use std::sync::Arc;
use std::time::Instant;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use log::{error, info};

use crate::csv_input;
use crate::encoder::OneHotEncoder;
use crate::error::ApiError;
use crate::forecast;
use crate::inference::StockModel;
use crate::models::{ModelInfo, PredictionsResponse};

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub async fn model_info(
    model: web::Data<Arc<dyn StockModel>>,
    encoder: web::Data<OneHotEncoder>,
) -> HttpResponse {
    HttpResponse::Ok().json(ModelInfo {
        input_width: model.input_width(),
        numeric_columns: forecast::NUMERIC_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect(),
        sku_categories: encoder.sku_count(),
        warehouse_categories: encoder.warehouse_count(),
    })
}

/// `POST /uploadfile/`: validate the uploaded CSV, then run the forecasting
/// loop on a blocking thread. The loop is sequential CPU work scaling with
/// pairs x horizon, so it stays off the async workers.
pub async fn upload_file(
    mut payload: Multipart,
    model: web::Data<Arc<dyn StockModel>>,
    encoder: web::Data<OneHotEncoder>,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();

    let (filename, bytes) = read_upload(&mut payload).await?;
    csv_input::check_filename(&filename)?;
    let records = csv_input::parse_records(&bytes)?;
    info!("upload {filename}: {} rows", records.len());

    let model = model.get_ref().clone();
    let encoder = encoder.into_inner();
    let predictions = web::block(move || forecast::forecast(&records, &encoder, model.as_ref()))
        .await
        .map_err(|e| {
            error!("forecast task failed to run: {e}");
            ApiError::Internal("forecast task failed".to_string())
        })??;

    info!(
        "forecast complete: {} records in {} ms",
        predictions.len(),
        started.elapsed().as_millis()
    );
    Ok(HttpResponse::Ok().json(PredictionsResponse { predictions }))
}

/// Pull the first file part out of the multipart stream; the field name is
/// whatever the client's form used.
async fn read_upload(payload: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        let filename = match field.content_disposition().get_filename() {
            Some(name) => name.to_owned(),
            None => continue,
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?
        {
            bytes.extend_from_slice(&chunk);
        }
        return Ok((filename, bytes));
    }
    Err(ApiError::Upload("no file field in multipart payload".to_string()))
}
