//! storyd - bedtime story server daemon

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use storyd::{Config, Server};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storyd", about = "Bedtime story generation server daemon")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyd=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    if std::env::var("ANTHROPIC_API_KEY").is_err() && std::env::var("ANTHROPIC_KEY").is_err() {
        warn!("ANTHROPIC_API_KEY not configured; story generation will fail");
    }

    let server = Server::new(config);
    server.run().await?;

    Ok(())
}
