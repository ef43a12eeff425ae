use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::encoder::EncodeError;

/// Request-level failures. The two validation kinds map to 400 with a
/// `detail` body naming the problem; everything else (malformed rows,
/// unseen categories, model shape mismatches) surfaces as a 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Only CSV files allowed")]
    InvalidFileType,

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid upload: {0}")]
    Upload(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFileType | ApiError::MissingColumns(_) | ApiError::Upload(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Encode(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_detail_names_every_column() {
        let err = ApiError::MissingColumns(vec!["Price".to_string(), "Festival".to_string()]);
        assert_eq!(err.to_string(), "Missing columns: Price, Festival");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_are_500() {
        let err = ApiError::Internal("model exploded".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn encode_errors_are_500_and_keep_their_message() {
        let err = ApiError::from(EncodeError::UnknownSku("SKU9".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "unknown SKU_ID category: SKU9");
    }
}
