//! HTTP error taxonomy with a single status table.
//!
//! `ApiError` renders as `{"error": message}`. Page-oriented endpoints
//! wrap it in `TextError`, which renders plain text, except that
//! `Forbidden` and `PayloadTooLarge` keep the JSON body everywhere.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::MissingField;
use crate::paths::PathError;
use crate::pipeline::PipelineError;
use crate::upload::UploadError;
use strict_path::StrictPathError;

pub const FORBIDDEN_MESSAGE: &str = "Access forbidden";

/// Error body for JSON clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", FORBIDDEN_MESSAGE)]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("File is too large. Maximum size is {max_mb}MB")]
    PayloadTooLarge { max_mb: usize },
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Variants whose body is JSON regardless of the endpoint.
    fn always_json(&self) -> bool {
        matches!(self, ApiError::Forbidden | ApiError::PayloadTooLarge { .. })
    }

    fn log(&self) {
        match self {
            ApiError::Internal(detail) => tracing::error!(detail, "Request failed"),
            ApiError::Forbidden => tracing::warn!("Access forbidden"),
            other => tracing::debug!(status = other.status().as_u16(), message = %other, "Request rejected"),
        }
    }

    fn json_response(&self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }

    fn text_response(&self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        self.json_response()
    }
}

/// Plain-text rendering of an `ApiError`.
#[derive(Debug)]
pub struct TextError(pub ApiError);

impl IntoResponse for TextError {
    fn into_response(self) -> Response {
        self.0.log();
        if self.0.always_json() {
            self.0.json_response()
        } else {
            self.0.text_response()
        }
    }
}

impl From<ApiError> for TextError {
    fn from(err: ApiError) -> Self {
        TextError(err)
    }
}

impl From<PipelineError> for TextError {
    fn from(err: PipelineError) -> Self {
        TextError(err.into())
    }
}

impl From<PathError> for TextError {
    fn from(err: PathError) -> Self {
        TextError(err.into())
    }
}

impl From<MissingField> for TextError {
    fn from(err: MissingField) -> Self {
        TextError(err.into())
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile
            | UploadError::NoFileSelected
            | UploadError::EmptyFile
            | UploadError::InvalidFileType => ApiError::BadRequest(err.to_string()),
            UploadError::TooLarge { max_mb } => ApiError::PayloadTooLarge { max_mb },
            UploadError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Forbidden(_) => ApiError::Forbidden,
            PipelineError::NotFound => ApiError::NotFound(err.to_string()),
            PipelineError::NoText => ApiError::BadRequest(err.to_string()),
            PipelineError::Extraction(_) | PipelineError::Rendering(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<PathError> for ApiError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::Boundary(inner) => inner.into(),
            other => {
                tracing::warn!(error = %other, "Path rejected");
                ApiError::Forbidden
            }
        }
    }
}

impl From<StrictPathError> for ApiError {
    fn from(err: StrictPathError) -> Self {
        tracing::warn!(error = %err, "Path escapes its boundary");
        ApiError::Forbidden
    }
}

impl From<MissingField> for ApiError {
    fn from(err: MissingField) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
