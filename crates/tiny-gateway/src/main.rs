use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tiny_gateway::cli::Cli;
use tiny_gateway::{App, AppState};
use tiny_generator::RandomGenerator;
use tiny_shortener::{Shortener, ShortenerService};
use tiny_storage::FileStorage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let storage = FileStorage::open(&cli.file_backend)
        .await
        .with_context(|| format!("failed to open {}", cli.file_backend.display()))?;
    let generator = RandomGenerator::new(cli.id_len);
    let shortener: Arc<dyn Shortener> = Arc::new(ShortenerService::with_settings(
        storage,
        generator,
        cli.shortener_settings(),
    ));

    let state = AppState::new(Arc::clone(&shortener), cli.authorizer());
    let app = App::router(state);

    let listener = tokio::net::TcpListener::bind(cli.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_addr))?;
    info!(
        listen_addr = %listener.local_addr()?,
        file_backend = %cli.file_backend.display(),
        id_len = cli.id_len,
        "starting tiny server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("closing service");
    shortener.close().await.context("failed to close storage")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
