//! Kamishibai player server entry point.

use std::error::Error;

use axum::Router;
use kamishibai_api::config::Config;
use kamishibai_api::state::AppState;
use kamishibai_api::{effects, headless, routes};
use kamishibai_scenario::application::sources::FileScenarioSource;
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Kamishibai player server");

    let config = Config::from_env()?;
    let addr = config.addr()?;

    // Load the scenario and show its first scene. A missing or empty
    // scenario has already been reported through the notifier.
    let (fades_tx, fades_rx) = mpsc::unbounded_channel();
    let mut engine = headless::engine(fades_tx, config.rng_seed)
        .with_effects(effects::builtin())
        .with_messages(config.messages.clone());
    engine
        .init(&FileScenarioSource::new(config.scenario_path.clone()))
        .await?;

    let app_state = AppState::new(engine);
    tokio::spawn(headless::run_fade_timers(
        app_state.engine.clone(),
        fades_rx,
        config.fade_in,
    ));

    // TODO: Replace CorsLayer::permissive() with the origins that host the viewer.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/player", routes::player::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
