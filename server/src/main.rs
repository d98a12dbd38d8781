use anyhow::Context;
use log::{info, warn};
use tokio::signal;

use server::{Predictor, Server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env()?;

    let predictor = Predictor::load(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;
    info!("model loaded from {}", config.model_path.display());

    let server = Server::bind(config.addr(), predictor).await?;
    server.run_until(shutdown_signal()).await?;

    Ok(())
}

/// Completes on Ctrl-C.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("received SIGINT, shutting down"),
        Err(e) => {
            warn!("can't listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}
