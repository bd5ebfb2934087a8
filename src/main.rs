// Mindcheck - Mental health screening questionnaire analysis
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

use mindcheck::analysis::{Analyzer, SafetyOverride};
use mindcheck::config::{load_config, Config};
use mindcheck::crisis::CrisisDetector;
use mindcheck::errors::ApiResponse;
use mindcheck::providers::create_provider;
use mindcheck::questionnaire::validate;
use mindcheck::server::MindcheckServer;

#[derive(Parser, Debug)]
#[command(name = "mindcheck")]
#[command(about = "Questionnaire analysis service with crisis safety override", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Bind address (overrides config and PORT)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Analyze a single submission and print the response envelope
    Analyze {
        /// JSON file with the submission (reads stdin when omitted)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut config = load_config()?;

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            run_server(config).await
        }
        Command::Analyze { input } => {
            let ok = run_analyze(config, input).await?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Assemble the analyzer from configuration
fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let detector = match &config.crisis_keywords_path {
        Some(path) => CrisisDetector::load_from_file(path)?,
        None => CrisisDetector::default(),
    };
    let provider = create_provider(&config.provider)?;

    Ok(Analyzer::new(provider, SafetyOverride::new(detector)))
}

async fn run_server(config: Config) -> Result<()> {
    let analyzer = build_analyzer(&config)?;
    let server = MindcheckServer::new(analyzer, config.server);
    server.serve().await
}

/// Run one submission through validation and analysis
///
/// Returns false when the submission was rejected.
async fn run_analyze(config: Config, input: Option<PathBuf>) -> Result<bool> {
    let raw = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read submission: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read submission from stdin")?;
            buf
        }
    };

    let payload: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            let envelope = ApiResponse::failure(format!("Invalid input data: {}", e));
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            return Ok(false);
        }
    };

    let submission = match validate(&payload) {
        Ok(submission) => submission,
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&ApiResponse::invalid(&err))?);
            return Ok(false);
        }
    };

    let analyzer = build_analyzer(&config)?;
    let result = analyzer.analyze(&submission).await;
    println!("{}", serde_json::to_string_pretty(&ApiResponse::ok(result))?);

    Ok(true)
}

/// Initialize tracing to stderr
///
/// Default INFO, overridden by RUST_LOG. MINDCHECK_DEBUG=1 forces debug.
fn init_tracing() {
    let show_debug = std::env::var("MINDCHECK_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    let env_filter = if show_debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
