//! `POST /upload`: multipart report upload.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{AppContext, UploadResponse};
use crate::upload::{store_upload, UploadError};

pub async fn upload(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut file: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&ctx, e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(&ctx, e))?;
        file = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = file.ok_or(UploadError::MissingFile)?;
    let stored = store_upload(&ctx.policy, ctx.upload_dir(), &filename, &bytes)?;

    Ok(Json(UploadResponse {
        file_path: stored.path.to_string_lossy().into_owned(),
    }))
}

/// Body-limit overruns surface while reading fields.
fn multipart_error(ctx: &AppContext, err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge {
            max_mb: ctx.config.max_content_length_mb(),
        }
    } else {
        tracing::warn!(error = %err, "Malformed multipart body");
        ApiError::BadRequest(err.body_text())
    }
}
