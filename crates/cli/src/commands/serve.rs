//! `askhound serve` — Start the HTTP API server.

use askhound_config::AppConfig;
use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config =
        AppConfig::load_with(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(host) = host_override {
        config.server.host = host;
    }
    if let Some(port) = port_override {
        config.server.port = port;
    }

    println!("🐾 Askhound API");
    println!("   Listening:  {}:{}", config.server.host, config.server.port);
    println!("   Documents:  {}", config.documents.dir);
    println!("   Deployment: {}", config.completion.deployment);

    askhound_gateway::start(config).await?;

    Ok(())
}
