//! HTTP server lifecycle.
//!
//! `serve` binds and runs in the foreground until Ctrl-C. `serve_until`
//! takes an already bound listener and any shutdown future.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::router::build_router;
use crate::api::types::AppContext;

/// Bind `addr` and serve until the process receives Ctrl-C.
pub async fn serve(ctx: AppContext, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_until(ctx, listener, ctrl_c()).await
}

/// Serve on `listener` until `shutdown` resolves, then drain in-flight
/// requests.
pub async fn serve_until<F>(ctx: AppContext, listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("Shutdown requested");
        })
        .await?;

    tracing::info!(%addr, "Server stopped");
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
