//! Forge server entry point.
//!
//! Starts the region workers and logs world announcements until interrupted.
//! Request intake belongs to the embedding game server, which drives the
//! runtime through [`forge_runtime::RuntimeHandle`].
use anyhow::Result;
use forge_bootstrap::{ServerConfig, ServerSetup, setup_logging};
use forge_runtime::{Event, Topic};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    let _guard = setup_logging(&config.log_dir())?;

    let runtime = ServerSetup::new(config).build().await?;
    let mut world_rx = runtime.handle().subscribe(Topic::World);

    let relay = tokio::spawn(async move {
        loop {
            match world_rx.recv().await {
                Ok(Event::World(event)) => match serde_json::to_string(&event) {
                    Ok(json) => tracing::info!(target: "forge::world", "{json}"),
                    Err(e) => tracing::warn!(target: "forge::world", error = %e, "Unserializable event"),
                },
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(target: "forge::world", skipped, "World relay lagging");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    relay.abort();
    runtime.shutdown().await?;
    Ok(())
}
