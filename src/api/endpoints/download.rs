//! `GET /download_report?path=...`: stream a generated report.

use std::path::Path;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::api::error::{ApiError, TextError};
use crate::api::types::{AppContext, DownloadQuery};
use crate::paths::resolve_within;

pub const DOWNLOAD_NAME: &str = "BloodSense_Report.pdf";

pub async fn download_report(
    State(ctx): State<AppContext>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, TextError> {
    let path = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No report path provided".into()))?;

    let resolved = resolve_within(&ctx.reports, Path::new(&path))?;
    let not_found = || TextError(ApiError::NotFound("Report not found".into()));
    if !resolved.is_file() {
        return Err(not_found());
    }

    // The sweeper may remove the file between the check and the open.
    let file = tokio::fs::File::open(&resolved).await.map_err(|_| not_found())?;

    tracing::info!(path = %resolved.display(), "Serving report download");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
            ),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
