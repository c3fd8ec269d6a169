use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use position_sync::server::{start_server, AppState, ServerConfig, DEFAULT_PORT};
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server IP address to bind to
    #[clap(short = 'H', long, default_value = "127.0.0.1")]
    host: String,
    /// Server port to listen on
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Directory holding game.html and its assets
    #[clap(short, long, default_value = "front_end")]
    static_dir: PathBuf,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            static_dir: args.static_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "position_sync=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from(Args::parse());
    let state = Arc::new(AppState::new());

    info!(
        url = %format!("http://{}:{}/", config.host, config.port),
        "Position sync starting"
    );

    tokio::select! {
        result = start_server(&config, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
