//! `talkio chat` — Single-message chat mode.

use talkio_config::AppConfig;
use talkio_core::SamplingConfig;
use talkio_engine::{ChatEngine, ChatTurn};
use talkio_prompt::Mode;

pub async fn run(message: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for the API key early so the error is actionable
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set the environment variable:");
        eprintln!("    export GEMINI_API_KEY='...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider = talkio_providers::build_from_config(&config)?;
    let sampling = SamplingConfig {
        temperature: config.temperature,
        max_output_tokens: config.max_output_tokens,
    };
    let engine = ChatEngine::new(provider).with_sampling(sampling);

    let turn = ChatTurn {
        message,
        history: Vec::new(),
        mode: Mode::default(),
        session_id: None,
    };

    eprint!("  Thinking...");
    let result = engine.respond(&turn).await;
    eprint!("\r              \r");

    let reply = result?;
    println!("{}", reply.text);

    Ok(())
}
