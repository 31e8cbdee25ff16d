//! HTTP surface: router, handlers, HTML pages, error mapping and the
//! server lifecycle.
//!
//! Routes:
//! - `GET /` landing page with the upload widget
//! - `POST /upload` multipart upload, JSON response
//! - `GET /form` patient details form for a stored upload
//! - `POST /result` runs the report pipeline, HTML response
//! - `GET /download_report` streams a generated PDF
//! - `GET /health` liveness check

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod server;
pub mod types;

pub use error::{ApiError, TextError};
pub use router::build_router;
pub use server::{serve, serve_until};
pub use types::AppContext;
