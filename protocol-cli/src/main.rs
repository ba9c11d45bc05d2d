//! trust-protocol: evaluate trust signals, screen connection proposals and
//! run signature interviews from the command line.
//!
//! Input documents are JSON files; results are printed to stdout as JSON.
//! Logs and interview prompts go to stderr.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use protocol_cli::{execute_command, Commands, ProtocolConfig};

#[derive(Parser)]
#[command(name = "trust-protocol")]
#[command(about = "Trust certification, connection screening and signature interviews")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "TRUST_PROTOCOL_CONFIG", default_value = "trust-protocol.yaml")]
    config: String,

    /// Log level (overrides config file; RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_found = std::path::Path::new(&cli.config).exists();
    let config = ProtocolConfig::load(&cli.config)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if config_found {
        info!("Config file: {}", cli.config);
    } else {
        info!("Config file not found, using defaults");
    }

    match execute_command(&config, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
