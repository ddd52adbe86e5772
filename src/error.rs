// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::listing::ListingError;

/// HTTP API error with the status codes and body shapes the frontend
/// expects. Validation and simple-lookup errors are plain text; the
/// listing writer and the status/image endpoints answer in JSON.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request, plain text naming the missing parameter
    MissingParam(&'static str),

    // 400 Bad Request, JSON {message}
    BadRequest(String),

    // 404 Not Found, plain text
    NotFound(&'static str),

    // 404 Not Found, JSON {message}
    NotFoundJson(String),

    // 409 Conflict, JSON {message, error}
    Conflict { message: String, detail: String },

    // 500 Internal Server Error, plain text with a fixed per-endpoint message
    Internal(&'static str),

    // 500 Internal Server Error, plain text carrying the raw driver error
    Database(sqlx::Error),

    // 500 Internal Server Error, JSON {message, error}
    WriteFailed { message: String, detail: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::NotFoundJson(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Database(_) | ApiError::WriteFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        match &err {
            ListingError::DuplicateId { .. } => ApiError::Conflict {
                message: err.to_string(),
                detail: err.detail().unwrap_or_default(),
            },
            // A missing listing and a listing owned by someone else answer
            // identically so the endpoint does not leak listing existence.
            ListingError::NotFoundOrUnauthorized => ApiError::NotFoundJson(err.to_string()),
            _ => ApiError::WriteFailed {
                message: err.to_string(),
                detail: err.detail().unwrap_or_default(),
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingParam(param) => write!(f, "{}", param),
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::NotFoundJson(msg) => write!(f, "{}", msg),
            ApiError::Conflict { message, .. } => write!(f, "{}", message),
            ApiError::Internal(msg) => write!(f, "{}", msg),
            ApiError::Database(err) => write!(f, "{}", err),
            ApiError::WriteFailed { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::MissingParam(param) => (status, param.to_string()).into_response(),
            ApiError::NotFound(msg) => (status, msg.to_string()).into_response(),
            ApiError::Internal(msg) => (status, msg.to_string()).into_response(),
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (status, err.to_string()).into_response()
            }
            ApiError::BadRequest(message) | ApiError::NotFoundJson(message) => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Conflict { message, detail } | ApiError::WriteFailed { message, detail } => {
                tracing::error!("Listing write failed: {}: {}", message, detail);
                (status, Json(json!({ "message": message, "error": detail }))).into_response()
            }
        }
    }
}
