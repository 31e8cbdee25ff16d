use anyhow::Context;

use bloodsense::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let _log_guard = bloodsense::logging::init_tracing(&config.log_dir);

    bloodsense::run(config).await.context("server failed")?;
    Ok(())
}
