//! Landing page and the metadata form.

use std::path::Path;

use axum::extract::{Query, State};
use axum::response::Html;

use crate::api::error::{ApiError, TextError};
use crate::api::pages;
use crate::api::types::{AppContext, FormQuery};
use crate::paths::resolve_within;

/// `GET /`
pub async fn index() -> Html<String> {
    Html(pages::index_page())
}

/// `GET /form?file_path=...`: only for uploads that still exist.
pub async fn form(
    State(ctx): State<AppContext>,
    Query(query): Query<FormQuery>,
) -> Result<Html<String>, TextError> {
    let file_path = query
        .file_path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No file path provided".into()))?;

    let resolved = resolve_within(ctx.uploads(), Path::new(&file_path))?;
    if !resolved.is_file() {
        return Err(ApiError::NotFound("File not found".into()).into());
    }

    Ok(Html(pages::form_page(&file_path)))
}
