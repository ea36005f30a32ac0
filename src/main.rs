//! Slated Server Entry Point

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use slated::{ApiAnalyzer, Config, DirectParser, MessageAnalyzer, RestApiConfig, Scheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Slated: Natural-Language Scheduling Backend
#[derive(Parser, Debug)]
#[command(name = "slated")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Parse a prompt locally and print the tasks as JSON
    Parse {
        /// The scheduling prompt
        prompt: String,
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            Config::from_file(path).with_context(|| format!("loading config from {path}"))?
        }
        None => Config::load()?,
    };

    match args.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(config, port).await,
        Command::Parse { prompt, date } => parse(prompt, date),
    }
}

async fn serve(mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.http_port = port;
    }

    let analyzer: Option<Arc<dyn MessageAnalyzer>> = if config.analyzer.enabled {
        match ApiAnalyzer::from_config(&config.analyzer) {
            Ok(analyzer) => {
                tracing::info!(model = %config.analyzer.model, "external analyzer enabled");
                Some(Arc::new(analyzer))
            }
            Err(e) => {
                // Missing key or a broken client falls back to the
                // rule-based tier rather than refusing to start.
                tracing::warn!("external analyzer unavailable, running rule-based only: {e}");
                None
            }
        }
    } else {
        tracing::info!("external analyzer disabled, running rule-based only");
        None
    };

    let scheduler = Arc::new(Scheduler::new(analyzer, &config.analyzer));
    let router = slated::create_rest_router(scheduler, &RestApiConfig::default());

    let addr = format!("{}:{}", config.server.host, config.server.http_port);
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn parse(prompt: String, date: Option<String>) -> anyhow::Result<()> {
    let parser = match date {
        Some(d) => {
            let date = chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .with_context(|| format!("invalid reference date {d:?}"))?;
            DirectParser::with_reference_date(date)
        }
        None => DirectParser::new(),
    };

    let tasks = parser.parse(&prompt);
    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}
