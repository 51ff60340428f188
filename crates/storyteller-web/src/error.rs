use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use storyteller_core::ClassifierError;
use storyteller_parsing::ParsingError;

use crate::models::ErrorBody;

pub const MODEL_UNAVAILABLE: &str =
    "Gender detection model not loaded. Please ensure model file exists.";
pub const ONLY_PDF: &str = "Only PDF files are allowed";

/// Errors surfaced to HTTP clients as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// The classifier was not available at startup.
    ServiceUnavailable,
    InvalidInput(String),
    /// Missing upload field or a body that is not valid multipart/JSON.
    UnprocessableRequest(String),
    PayloadTooLarge(String),
    /// Extraction, parsing or annotation failed; carries the cause's message.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::ServiceUnavailable => MODEL_UNAVAILABLE,
            ApiError::InvalidInput(d)
            | ApiError::UnprocessableRequest(d)
            | ApiError::PayloadTooLarge(d)
            | ApiError::Internal(d) => d,
        }
    }

    /// Map a multipart read failure, keeping axum's body-limit status.
    pub fn from_multipart(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::UnprocessableRequest(err.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.detail().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Failure inside the extract → parse → annotate pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to store upload: {0}")]
    Scratch(#[from] std::io::Error),
    #[error("{0}")]
    Parsing(#[from] ParsingError),
    #[error("{0}")]
    Annotation(#[from] ClassifierError),
    #[error("processing task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl From<ScriptError> for ApiError {
    fn from(err: ScriptError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
