//! Application router.
//!
//! Every route shares one `AppContext` through axum state. The body
//! limit applies to all routes; the logging middleware is outermost so
//! it also sees fallback and limit rejections.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::AppContext;

pub fn build_router(ctx: AppContext) -> Router {
    let body_limit = ctx.config.max_content_length;

    Router::new()
        .route("/", get(endpoints::pages::index))
        .route("/upload", post(endpoints::upload::upload))
        .route("/form", get(endpoints::pages::form))
        .route("/result", post(endpoints::result::result))
        .route("/download_report", get(endpoints::download::download_report))
        .route("/health", get(endpoints::health::check))
        .fallback(endpoints::not_found)
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::audit::log_requests))
}
