//! `talkio serve` — Start the HTTP API server.

use talkio_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("Talkio Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.model);
    if !config.has_api_key() {
        println!("   WARNING:   no GEMINI_API_KEY set; chat requests will fail");
    }

    talkio_gateway::start(config).await?;

    Ok(())
}
