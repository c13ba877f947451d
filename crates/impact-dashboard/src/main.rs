//! Research Impact Dashboard - Entry Point
//!
//! Starts the HTTP dashboard backed by the Dimensions Analytics API.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use impact_dashboard::config::{self, Config};
use impact_dashboard::loader::Loader;
use impact_dashboard::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "impact-dashboard")]
#[command(about = "Research impact dashboard for the Dimensions Analytics API")]
#[command(version)]
struct Cli {
    /// Dimensions API key (optional; can also be submitted in the UI)
    #[arg(long, env = "DIMENSIONS_API_KEY")]
    api_key: Option<String>,

    /// Dimensions API endpoint
    #[arg(long, default_value = config::api::BASE_URL, env = "DIMENSIONS_ENDPOINT")]
    endpoint: String,

    /// Organization the publication search matches against
    #[arg(long, default_value = config::DEFAULT_ORGANIZATION, env = "DASHBOARD_ORGANIZATION")]
    organization: String,

    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %cli.endpoint,
        organization = %cli.organization,
        "Starting impact dashboard"
    );

    let mut config = Config::new(cli.api_key.clone());
    config.endpoint = cli.endpoint;
    config.organization = cli.organization.clone();

    let loader = Loader::new(&config)?;
    let state = Arc::new(AppState::new(loader, cli.organization, cli.api_key));

    server::run(state, cli.port).await
}
