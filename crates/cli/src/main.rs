//! sdg9aid CLI
//!
//! Command-line interface for SDG 9 violation analysis: send a text
//! description or an image to Gemini and print the judgment, or serve the
//! web UI.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use analysis_core::{AnalysisPayload, SDG9_PROMPT};
use llm_bridge::{Dispatcher, GeminiClient, TextModel, VisionModel};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("BUILT_GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILT_TIME_UTC"),
    " on ",
    env!("BUILT_HOST"),
    ")"
);

#[derive(Parser)]
#[command(name = "sdg9aid")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Analyze text or images for SDG 9 violations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one input; an image takes priority over text
    Analyze {
        /// Text description of an industrial practice or scene
        #[arg(short, long)]
        text: Option<String>,

        /// Path to an image (jpg, jpeg or png) of the industrial scene
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Also write the result to this file (e.g. analysis_result.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the web UI and analysis API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory with the built frontend assets
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            text,
            image,
            output,
        } => analyze(text, image, output).await,
        Commands::Serve { port, static_dir } => sdg9aid_server::run(port, static_dir).await,
    }
}

async fn analyze(
    text: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let image_bytes = match &image {
        Some(path) => Some(
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    // Validation happens before the client is built: bad input never
    // reaches the network
    let payload = AnalysisPayload::from_parts(text, image_bytes)?;

    let client = Arc::new(GeminiClient::from_env()?);
    let dispatcher = Dispatcher::new(
        Arc::new(TextModel::from_client(client.clone())),
        Arc::new(VisionModel::from_client(client)),
    );

    let result = dispatcher.analyze(SDG9_PROMPT, &payload).await;
    println!("{result}");

    if let Some(path) = output {
        std::fs::write(&path, &result)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Result written to {}", path.display());
    }

    Ok(())
}
