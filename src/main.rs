use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use athletics_mcp::aggregator::Aggregator;
use athletics_mcp::config::Config;
use athletics_mcp::crawler::Extractor;
use athletics_mcp::server::{shutdown_signal, AthleticsServer};
use athletics_mcp::tools::{ToolDispatcher, ToolSet};
use athletics_mcp::{metrics, stdio};

#[derive(Parser)]
#[command(
    name = "athletics-mcp",
    version,
    about = "Tool server exposing college athletics rosters, schedules, stats and news",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON-RPC tool protocol over HTTP
    Serve {
        /// Override the bind address (e.g. 127.0.0.1:8080)
        #[arg(short, long)]
        bind: Option<std::net::SocketAddr>,
    },

    /// Serve the roster and schedule tools over stdin/stdout
    Stdio,

    /// Run a single tool and print its result
    Call {
        /// Tool name (e.g. get_roster)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// List the configured sports
    Sports,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    setup_tracing(&config.logging.level, &config.logging.format, cli.verbose)?;
    config.validate()?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            serve(&config).await?;
        }
        Commands::Stdio => {
            stdio::run(build_aggregator(&config)?).await?;
        }
        Commands::Call { tool, args } => {
            tracing::info!(tool = %tool, "Running one-shot tool call");
            call(&config, &tool, &args).await?;
        }
        Commands::Sports => {
            sports(&config);
        }
    }

    Ok(())
}

/// Logs always go to stderr; stdout is reserved for protocol frames and
/// command output.
fn setup_tracing(level: &str, format: &str, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { level };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("athletics_mcp={level},warn")))
        .context("Invalid log filter")?;

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn build_aggregator(config: &Config) -> Result<Aggregator> {
    let extractor = Extractor::new(config).context("Failed to create extractor")?;
    Ok(Aggregator::new(extractor, config.catalog()))
}

async fn serve(config: &Config) -> Result<()> {
    if let Err(e) = metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed, continuing without metrics");
    }

    let server = AthleticsServer::with_aggregator(config, build_aggregator(config)?);
    server
        .start_with_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn call(config: &Config, tool: &str, args: &str) -> Result<()> {
    let args: serde_json::Value =
        serde_json::from_str(args).context("--args must be a JSON object")?;

    let dispatcher = ToolDispatcher::new(build_aggregator(config)?, ToolSet::Full);
    let data = dispatcher
        .call_data(tool, Some(&args))
        .await
        .with_context(|| format!("Tool {tool} failed"))?;

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn sports(config: &Config) {
    let catalog = config.catalog();

    println!("Available sports ({}):", catalog.available().len());
    for sport in catalog.available() {
        let marker = if catalog.summary().contains(sport) { " *" } else { "" };
        println!("  {sport}{marker}");
    }
    println!();
    println!("* included in the all-sports summary");
}
