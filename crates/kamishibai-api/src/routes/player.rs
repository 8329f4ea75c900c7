//! Player controls: the buttons and clicks a viewer sends to the engine.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use kamishibai_core::element::ElementId;
use kamishibai_core::error::EngineError;
use kamishibai_core::event::DomainEvent;
use kamishibai_core::instance::InstanceId;
use kamishibai_navigation::application::engine::{ClickOutcome, Engine};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Snapshot of the presentation returned by every control.
#[derive(Debug, Serialize)]
pub struct PlayerState {
    /// Scenario title.
    pub title: String,
    /// Index of the scene on screen.
    pub current_scene: usize,
    /// Number of scenes.
    pub scene_count: usize,
    /// Name of the scene on screen.
    pub scene_name: String,
    /// Live instance to address clicks to.
    pub instance_id: Option<u64>,
    /// Whether the live instance finished fading in and its music started.
    pub audio_started: bool,
    /// Where the last `open-url` action pointed the outer surface.
    pub last_external_url: Option<String>,
}

impl PlayerState {
    fn of(engine: &Engine) -> Result<Self, EngineError> {
        let scenario = engine.scenario().ok_or(EngineError::NotInitialized)?;
        let current_scene = engine.current_scene().ok_or(EngineError::NotInitialized)?;
        let live = engine.live_instance();
        Ok(Self {
            title: scenario.title.clone(),
            current_scene,
            scene_count: scenario.scene_count(),
            scene_name: scenario
                .scene(current_scene)
                .map(|scene| scene.name.clone())
                .unwrap_or_default(),
            instance_id: live.map(|instance| instance.id.0),
            audio_started: live.is_some_and(|instance| instance.audio_started()),
            last_external_url: engine.last_external_url().map(str::to_owned),
        })
    }
}

/// Request body for POST /jump.
#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    /// Target scene index; clamped into range.
    pub index: i64,
}

/// Request body for POST /click.
#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    /// The instance the viewer saw when clicking.
    pub instance_id: u64,
    /// Author-given element id; the scene root when absent.
    pub element: Option<String>,
}

/// Response body for POST /click.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    /// What the click did.
    #[serde(flatten)]
    pub outcome: ClickOutcome,
    /// The presentation after the click.
    pub state: PlayerState,
}

/// One journal entry.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    /// Unique event id.
    pub event_id: Uuid,
    /// Event type name.
    pub event_type: &'static str,
    /// Position in the session journal, starting at 1.
    pub sequence_number: i64,
    /// When the event happened.
    pub occurred_at: DateTime<Utc>,
    /// Event-specific data.
    pub payload: serde_json::Value,
}

/// GET /state
#[instrument(skip(state))]
async fn get_state(State(state): State<AppState>) -> Result<Json<PlayerState>, ApiError> {
    let engine = state.engine()?;
    Ok(Json(PlayerState::of(&engine)?))
}

/// POST /first
#[instrument(skip(state))]
async fn first(State(state): State<AppState>) -> Result<Json<PlayerState>, ApiError> {
    let mut engine = state.engine()?;
    let index = engine.go_first()?;
    info!(index, "jumped to first scene");
    Ok(Json(PlayerState::of(&engine)?))
}

/// POST /next
#[instrument(skip(state))]
async fn next(State(state): State<AppState>) -> Result<Json<PlayerState>, ApiError> {
    let mut engine = state.engine()?;
    let index = engine.go_next()?;
    info!(index, "advanced");
    Ok(Json(PlayerState::of(&engine)?))
}

/// POST /previous
#[instrument(skip(state))]
async fn previous(State(state): State<AppState>) -> Result<Json<PlayerState>, ApiError> {
    let mut engine = state.engine()?;
    let index = engine.go_previous()?;
    info!(index, "went back");
    Ok(Json(PlayerState::of(&engine)?))
}

/// POST /jump
#[instrument(skip(state, request), fields(target = request.index))]
async fn jump(
    State(state): State<AppState>,
    Json(request): Json<JumpRequest>,
) -> Result<Json<PlayerState>, ApiError> {
    let mut engine = state.engine()?;
    let index = engine.go_to_scene(request.index)?;
    info!(index, "jumped");
    Ok(Json(PlayerState::of(&engine)?))
}

/// POST /click
#[instrument(
    skip(state, request),
    fields(instance_id = request.instance_id, element = ?request.element)
)]
async fn click(
    State(state): State<AppState>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<ClickResponse>, ApiError> {
    let mut engine = state.engine()?;
    let target = match &request.element {
        None => Some(ElementId::ROOT),
        Some(name) => engine
            .live_instance()
            .and_then(|live| live.elements.find_by_name(name)),
    };

    let outcome = match target {
        Some(element) => engine.click(InstanceId(request.instance_id), element)?,
        None => ClickOutcome::Ignored,
    };
    info!(?outcome, "click handled");

    Ok(Json(ClickResponse {
        outcome,
        state: PlayerState::of(&engine)?,
    }))
}

/// GET /history
#[instrument(skip(state))]
async fn history(State(state): State<AppState>) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let engine = state.engine()?;
    let entries = engine
        .history()
        .iter()
        .map(|event| HistoryEntry {
            event_id: event.metadata.event_id,
            event_type: event.event_type(),
            sequence_number: event.metadata.sequence_number,
            occurred_at: event.metadata.occurred_at,
            payload: event.to_payload(),
        })
        .collect();
    Ok(Json(entries))
}

/// Returns the router for the player controls.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/first", post(first))
        .route("/next", post(next))
        .route("/previous", post(previous))
        .route("/jump", post(jump))
        .route("/click", post(click))
        .route("/history", get(history))
}
