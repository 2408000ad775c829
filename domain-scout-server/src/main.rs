//! Server entry point: parse arguments, load configuration, wire the
//! pipeline, and serve the API.

use anyhow::Context;
use domain_scout_server::api;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use domain_scout_lib::{load_file, ScoutConfig};

#[derive(Parser, Debug)]
#[command(name = "domain-scout-server")]
#[command(version, about = "Domain candidate generation and availability API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address, overriding configuration (e.g. 127.0.0.1:8080)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("domain_scout=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => Some(load_file(path).with_context(|| format!("loading config {}", path))?),
        None => None,
    };

    let mut config = ScoutConfig::from_sources(file_config);
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    info!(
        bind = %config.bind_addr,
        lookup = config.resolver.lookup_api_key.is_some(),
        probe = config.resolver.probe_enabled,
        "starting domain-scout"
    );

    let state = Arc::new(api::AppState::from_config(&config).context("building pipeline")?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}
