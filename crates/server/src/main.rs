mod api;
mod dto;
mod state;

use crate::state::AppState;
use anyhow::Context;
use axum::routing::get;
use clap::Parser;
use pendler::prelude::*;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pendler-server", author, version, about, long_about = None)]
struct Cli {
    /// Journey planner base URL
    #[arg(long, env = "PENDLER_BASE_URL")]
    base_url: Option<String>,

    /// Journey planner access key
    #[arg(long, env = "PENDLER_ACCESS_KEY")]
    access_key: Option<String>,

    /// Most trips asked for per search
    #[arg(long, env = "PENDLER_MAX_TRIPS")]
    max_trips: Option<u8>,

    /// Minutes from home to the origin station
    #[arg(long, env = "PENDLER_WALK_MINUTES")]
    walk_minutes: Option<u32>,

    /// Longest acceptable wait on the platform, in minutes
    #[arg(long, env = "PENDLER_MAX_WAIT_MINUTES")]
    max_wait_minutes: Option<u32>,

    /// Seconds between departure board refreshes
    #[arg(long, env = "PENDLER_POLL_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    poll_secs: Option<u64>,

    /// Port to listen on
    #[arg(long, env = "PENDLER_PORT", default_value_t = 3000)]
    port: u16,
}

impl Cli {
    /// Flags win over the environment overlay already in `config`.
    fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(access_key) = &self.access_key {
            config.api.access_key = access_key.clone();
        }
        if let Some(max_trips) = self.max_trips {
            config.api.max_trips = max_trips;
        }
        if let Some(walk_minutes) = self.walk_minutes {
            config.commute.walk_minutes = walk_minutes;
        }
        if let Some(max_wait_minutes) = self.max_wait_minutes {
            config.commute.max_wait_minutes = max_wait_minutes;
        }
        if let Some(poll_secs) = self.poll_secs {
            config.departures.poll_interval_secs = poll_secs;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    cli.apply(&mut config);

    info!("Starting server against {}", config.api.base_url);
    let state = Arc::new(AppState::new(config).context("Failed to build API client")?);

    let app = axum::Router::new()
        .route("/search", get(api::search))
        .route("/departures", get(api::departures))
        .route("/trips", get(api::trips))
        .route("/route", get(api::route))
        .route("/map", get(api::map))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cli.port))
        .await
        .with_context(|| format!("Failed to bind port {}", cli.port))?;
    info!("Listening to port {}", cli.port);
    axum::serve(listener, app).await?;
    Ok(())
}

#[test]
fn flags_override_config() {
    let cli = Cli::try_parse_from([
        "pendler-server",
        "--walk-minutes",
        "10",
        "--max-wait-minutes",
        "4",
        "--poll-secs",
        "15",
    ])
    .unwrap();
    let mut config = Config::default();
    cli.apply(&mut config);
    assert_eq!(config.commute.walk_minutes, 10);
    assert_eq!(config.commute.max_wait_minutes, 4);
    assert_eq!(config.departures.poll_interval_secs, 15);
}

#[test]
fn zero_poll_secs_rejected() {
    assert!(Cli::try_parse_from(["pendler-server", "--poll-secs", "0"]).is_err());
}
