use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adoption_gateway::config::{load_config, GatewayConfig};
use adoption_gateway::http::{AppState, GatewayServer};
use adoption_gateway::lifecycle::Shutdown;
use adoption_gateway::observability::metrics;

#[derive(Debug, Parser)]
#[command(name = "adoption-gateway", about = "Pet-adoption BFF gateway")]
struct Args {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "adoption_gateway={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        pets_url = %config.upstreams.pets_url,
        applications_url = %config.upstreams.applications_url,
        history_url = %config.upstreams.history_url,
        retry_attempts = config.retry.attempts,
        breaker_fail_max = config.breaker.fail_max,
        cache_ttl_secs = config.cache.ttl_secs,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(err) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %err,
                "failed to parse metrics address"
            ),
        }
    }

    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = GatewayServer::new(&config, state);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
