use axum::{
    extract::rejection::JsonRejection,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::screening::sanitizer::SanitizeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Model API credential is not configured")]
    MissingCredential,

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("AI returned non-JSON content")]
    NonJsonOutput,

    #[error("Invalid AI JSON: {0}")]
    InvalidOutput(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::UnsupportedType(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingCredential | AppError::Extraction(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Llm(_) | AppError::NonJsonOutput | AppError::InvalidOutput(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedType(msg) => (
                "UNSUPPORTED_TYPE",
                format!("Unsupported file type: {msg}. Upload a PDF or DOCX file."),
            ),
            AppError::PayloadTooLarge(msg) => ("PAYLOAD_TOO_LARGE", msg.clone()),
            AppError::MissingCredential => {
                tracing::error!("Analysis requested but no model API key is configured");
                (
                    "MISSING_API_KEY",
                    "Google Generative AI API key is missing. \
                     Please check your environment configuration."
                        .to_string(),
                )
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                ("EXTRACTION_ERROR", msg.clone())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    "UPSTREAM_ERROR",
                    format!("The AI service request failed: {msg}"),
                )
            }
            AppError::NonJsonOutput => {
                tracing::warn!("Model returned non-JSON content");
                (
                    "NON_JSON_OUTPUT",
                    "AI returned non-JSON content. Please try again.".to_string(),
                )
            }
            AppError::InvalidOutput(msg) => {
                tracing::warn!("Model returned invalid JSON: {msg}");
                ("INVALID_OUTPUT", format!("Invalid AI JSON: {msg}"))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedType(hint) => AppError::UnsupportedType(hint),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl From<SanitizeError> for AppError {
    fn from(err: SanitizeError) -> Self {
        match err {
            SanitizeError::NonJson => AppError::NonJsonOutput,
            other => AppError::InvalidOutput(other.to_string()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Llm(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(format!("File too large: {}", err.body_text()));
        }
        AppError::Validation(format!("Failed to read upload: {}", err.body_text()))
    }
}
