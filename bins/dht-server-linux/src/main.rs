use dht_core::ServerSettings;
use dht_providers::build_sensors;
use dht_server::{SensorServer, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,dht_server=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("DHT Server starting...");

    // Configuration: optional JSON settings file as the only argument
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            tracing::info!("Loading settings from {}", path.display());
            ServerSettings::load(&path)?
        }
        None => {
            tracing::info!("No settings file given, using simulated sensors");
            ServerSettings::default()
        }
    };

    let sensors = build_sensors(&settings.sensors);
    let server = SensorServer::new(ServerConfig::from(&settings), sensors);
    let addr = settings.bind_addr;

    let server_handle = tokio::spawn(server.run());

    tracing::info!("Try these commands:");
    tracing::info!("   curl http://{}/", addr);
    tracing::info!("   curl http://{}/report", addr);
    tracing::info!("   curl http://{}/sensor0/temp/c", addr);

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        result = server_handle => {
            match result {
                Ok(Ok(())) => tracing::warn!("Server stopped"),
                Ok(Err(e)) => return Err(anyhow::anyhow!("Server error: {}", e)),
                Err(e) => return Err(anyhow::anyhow!("Server task failed: {}", e)),
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
