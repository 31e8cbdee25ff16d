pub mod api;
pub mod config;
pub mod logging;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod retention;
pub mod upload;

use crate::api::AppContext;
use crate::config::AppConfig;
use crate::retention::RetentionSweeper;

/// Start the retention sweeper and serve HTTP until Ctrl-C.
/// Expects tracing to be initialized already.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if config.uses_placeholder_secret() {
        tracing::warn!("SECRET_KEY is not set; using the built-in placeholder");
    }
    if !pipeline::extraction::is_tesseract_available(&config.tesseract_path) {
        tracing::warn!(
            path = %config.tesseract_path,
            "tesseract not found; report processing will fail until it is installed"
        );
    }

    config.ensure_dirs()?;

    RetentionSweeper::spawn_once(
        vec![config.upload_dir.clone(), config.temp_dir.clone()],
        config.retention_window(),
    );

    let addr = config.bind_addr;
    let ctx = AppContext::new(config).map_err(std::io::Error::other)?;
    api::serve(ctx, addr).await
}
