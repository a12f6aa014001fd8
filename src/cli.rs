//! Command-line interface: `serve` runs the HTTP service, `classify`
//! performs a one-shot local prediction.

use crate::app_state::AppState;
use crate::config::load_config;
use crate::service::PredictionService;
use crate::web::build_router;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(name = "spamsieve", about = "Spam/ham message classifier service")]
pub struct Cli {
    /// Path to a TOML config file (defaults to spamsieve.toml).
    #[clap(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP prediction server.
    Serve {
        /// Override the configured bind address.
        #[clap(long)]
        bind: Option<String>,
    },
    /// Classify a single message locally and print the result as JSON.
    Classify {
        text: String,
        /// Override the configured model artifact directory.
        #[clap(long)]
        model_dir: Option<String>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                bind.parse::<std::net::SocketAddr>()
                    .with_context(|| format!("invalid bind address {bind}"))?;
                config.bind_addr = bind;
            }

            let service =
                PredictionService::from_artifact_dir(Path::new(&config.model_dir), config.max_message_len);
            if !service.ready() {
                // The server still starts; /readyz stays false and every
                // prediction reports the load failure.
                info!("starting without a usable model artifact");
            }

            let bind_addr = config.bind_addr.clone();
            let state = Arc::new(AppState::new(service, config));
            let app = build_router(state);

            let listener = tokio::net::TcpListener::bind(&bind_addr)
                .await
                .with_context(|| format!("failed to bind {bind_addr}"))?;
            info!("HTTP server listening on http://{bind_addr}");
            axum::serve(listener, app).await.context("server error")?;
        }
        Commands::Classify { text, model_dir } => {
            let dir = model_dir.unwrap_or_else(|| config.model_dir.clone());
            let service =
                PredictionService::from_artifact_dir(Path::new(&dir), config.max_message_len);
            let result = service.predict(&text)?;

            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "prediction": result.label.to_string(),
                    "probability": format!("{:.2}%", result.confidence * 100.0),
                    "keywords": result.keywords,
                }))?
            );
        }
    }

    Ok(())
}
