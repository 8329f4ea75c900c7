//! Shared test helpers for player API integration tests.
#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use kamishibai_api::headless::{self, HeadlessSurface, LoggingMedia, LogNotifier, RedirectNavigator};
use kamishibai_api::state::AppState;
use kamishibai_api::{effects, routes};
use kamishibai_core::rng::DeterministicRng;
use kamishibai_navigation::application::engine::{Collaborators, Engine};
use kamishibai_scenario::application::sources::StaticScenarioSource;
use kamishibai_test_support::{MockRng, fixed_clock};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Three scenes: a title card with a link and a dice roll, a hallway whose
/// background restarts the deck, and an ending that ignores clicks.
pub const DECK: &str = r##"
title: Test deck
click_sounds:
  - { id: se-click, src: audio/click.ogg }
scenes:
  - name: opening
    audio:
      - { id: bgm-opening, src: audio/opening.ogg }
    elements:
      - background_image: img/opening.png
      - id: title
        text: "# Welcome"
      - id: door
        text: "Open the **door**"
        action: { kind: open-url, url: "https://example.org/exit" }
      - id: dice
        text: Roll
        action: { kind: jump, jump_range_min: 1, jump_range_max: 2 }
  - name: hallway
    action: { kind: custom, handler: restart }
    elements:
      - id: note
        text: Back to the start
      - id: shout
        text: Shout
        action: { kind: custom, handler: log, params: { message: hello } }
      - id: mumble
        text: Mumble
        action: { kind: custom, handler: log }
  - name: ending
    elements:
      - id: end
        text: The end
        action: { kind: none }
"##;

/// Build the full app router over `DECK` with headless collaborators and
/// deterministic randomness. Fades complete immediately. Uses the same
/// route structure as `main.rs`.
pub async fn build_test_app() -> (Router, AppState) {
    build_test_app_with_rng(Box::new(MockRng)).await
}

/// Same as [`build_test_app`] with a custom RNG for dice scenes.
pub async fn build_test_app_with_rng(rng: Box<dyn DeterministicRng>) -> (Router, AppState) {
    let (fades_tx, fades_rx) = mpsc::unbounded_channel();
    let mut engine = Engine::new(Collaborators {
        surface: Box::new(HeadlessSurface::new(fades_tx)),
        media: Box::new(LoggingMedia::default()),
        navigator: Box::new(RedirectNavigator),
        notifier: Box::new(LogNotifier),
        rng,
        clock: Box::new(fixed_clock()),
    })
    .with_effects(effects::builtin());
    engine
        .init(&StaticScenarioSource::yaml(DECK))
        .await
        .unwrap();

    let app_state = AppState::new(engine);
    tokio::spawn(headless::run_fade_timers(
        app_state.engine.clone(),
        fades_rx,
        Duration::ZERO,
    ));

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/player", routes::player::router())
        .with_state(app_state.clone());
    (app, app_state)
}

/// Waits until the fade timer has started the live instance's music.
pub async fn wait_for_fade(state: &AppState) {
    for _ in 0..100 {
        let started = state
            .engine()
            .unwrap()
            .live_instance()
            .is_some_and(|live| live.audio_started());
        if started {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("fade-in never completed");
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
