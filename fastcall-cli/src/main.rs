mod call;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use fastcall_server::ServerConfig;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fastcall", version, about = "Peer-to-peer calls over a room relay")]
struct Cli {
    /// Default log filter; `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay.
    Serve {
        #[arg(long, env = "FASTCALL_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
    /// Join a room as a headless peer driven from stdin.
    Call(call::CallArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Serve { bind } => {
            println!("{}", format!("Starting relay on ws://{}", bind).green().bold());
            fastcall_server::serve(ServerConfig { bind_addr: bind }).await
        }
        Commands::Call(args) => call::run(args).await,
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install tracing subscriber")
}
