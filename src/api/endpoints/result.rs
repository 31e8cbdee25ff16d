//! `POST /result`: run the pipeline for one upload and show the report.

use std::collections::HashMap;
use std::path::PathBuf;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Form;

use crate::api::error::{ApiError, TextError};
use crate::api::pages;
use crate::api::types::AppContext;
use crate::models::PatientMetadata;

pub async fn result(
    State(ctx): State<AppContext>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Html<String>, TextError> {
    let Form(form) = form.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge {
                max_mb: ctx.config.max_content_length_mb(),
            }
        } else {
            ApiError::BadRequest(e.body_text())
        }
    })?;

    let patient = PatientMetadata::from_form(&form).map_err(|e| {
        tracing::warn!(field = e.0, "Missing required field");
        e
    })?;
    tracing::info!(patient = %patient.name, "Processing report");

    let file_path = form
        .get("file_path")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| {
            tracing::warn!("No file path provided");
            ApiError::BadRequest("No file path provided".into())
        })?;

    let pipeline = ctx.pipeline.clone();
    let outcome = tokio::task::spawn_blocking(move || pipeline.run(&file_path, patient))
        .await
        .map_err(|e| ApiError::Internal(format!("An error occurred: {e}")))??;

    Ok(Html(pages::result_page(&outcome)))
}
