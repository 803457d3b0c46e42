use clap::Parser;
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::ServerConfig;

/// Session-backed to-do list server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of HTTP workers
    #[arg(long)]
    workers: Option<usize>,

    /// Seconds of inactivity before a session is dropped
    #[arg(long)]
    session_idle_timeout: Option<u64>,

    /// Maximum number of sessions kept in memory
    #[arg(long)]
    session_capacity: Option<usize>,
}

impl Args {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(workers) = self.workers.filter(|n| *n > 0) {
            config.workers = workers;
        }
        if let Some(secs) = self.session_idle_timeout {
            config.session_idle_timeout = Duration::from_secs(secs);
        }
        if let Some(capacity) = self.session_capacity.and_then(NonZeroUsize::new) {
            config.session_capacity = capacity;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let config = Args::parse().apply(ServerConfig::from_env());
    tracing::info!(?config, "Starting standalone todo server...");

    if let Err(e) = web_service::server::run(config).await {
        tracing::error!("Failed to run web service: {:#}", e);
        std::process::exit(1);
    }
}
