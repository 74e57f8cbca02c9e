//! powchain node entry point.

use anyhow::Context;
use clap::Parser;
use powchain_server::{build_state, router, NodeArgs};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = NodeArgs::parse();
    let state = build_state(&args)?;

    let listen_address = args.listen_address();
    let listener = TcpListener::bind(&listen_address)
        .await
        .with_context(|| format!("failed to bind {listen_address}"))?;
    info!(%listen_address, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
