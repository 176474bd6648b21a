//! Talkio CLI — the main entry point.
//!
//! Commands:
//! - `serve`    — Start the HTTP chat gateway
//! - `chat`     — Send a single message from the terminal
//! - `classify` — Run the pre-classification gate on a piece of text

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "talkio",
    about = "Talkio — multilingual chat companion with a safety gate",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send a single message and print the reply
    Chat {
        /// The message text
        message: String,
    },

    /// Run the greeting/crisis gate on text without calling the model
    Classify {
        /// The text to classify
        text: String,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Classify { text, json } => commands::classify::run(&text, json)?,
    }

    Ok(())
}
