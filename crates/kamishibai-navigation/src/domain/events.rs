//! Session journal events for scene navigation.

use kamishibai_core::event::{DomainEvent, EventMetadata};
use kamishibai_core::instance::InstanceId;
use serde::Serialize;

use crate::domain::requests::NavigationRequest;

/// Event type name for [`ScenarioLoaded`].
pub const SCENARIO_LOADED_EVENT_TYPE: &str = "navigation.scenario_loaded";
/// Event type name for [`SceneEntered`].
pub const SCENE_ENTERED_EVENT_TYPE: &str = "navigation.scene_entered";
/// Event type name for [`BackgroundAudioStarted`].
pub const BACKGROUND_AUDIO_STARTED_EVENT_TYPE: &str = "navigation.background_audio_started";
/// Event type name for [`ExternalNavigation`].
pub const EXTERNAL_NAVIGATION_EVENT_TYPE: &str = "navigation.external_navigation";
/// Event type name for [`CustomEffectRan`].
pub const CUSTOM_EFFECT_RAN_EVENT_TYPE: &str = "navigation.custom_effect_ran";

/// Emitted when a scenario is loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioLoaded {
    /// Presentation title.
    pub title: String,
    /// Number of scenes.
    pub scene_count: usize,
    /// Source document digest.
    pub version_hash: String,
}

/// Emitted when a transition renders a scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneEntered {
    /// Scene shown before, `None` on the first render of a session.
    pub from: Option<usize>,
    /// Scene shown now.
    pub to: usize,
    /// The request that caused the move.
    pub requested: NavigationRequest,
    /// The new live instance.
    pub instance: InstanceId,
}

/// Emitted when a fade-in completes and scene music starts.
#[derive(Debug, Clone, Serialize)]
pub struct BackgroundAudioStarted {
    /// The instance whose music started.
    pub instance: InstanceId,
    /// Number of tracks started.
    pub tracks: usize,
}

/// Emitted when an `open-url` action redirects the outer surface.
#[derive(Debug, Clone, Serialize)]
pub struct ExternalNavigation {
    /// The target location.
    pub url: String,
}

/// Emitted when a custom effect handler completes.
#[derive(Debug, Clone, Serialize)]
pub struct CustomEffectRan {
    /// The handler name.
    pub handler: String,
    /// Where the effect navigated to, if anywhere.
    pub navigated_to: Option<usize>,
}

/// Event payload variants for scene navigation.
#[derive(Debug, Clone, Serialize)]
pub enum NavigationEventKind {
    /// A scenario has been loaded.
    ScenarioLoaded(ScenarioLoaded),
    /// A scene has been rendered.
    SceneEntered(SceneEntered),
    /// Background audio has started.
    BackgroundAudioStarted(BackgroundAudioStarted),
    /// The outer surface was redirected.
    ExternalNavigation(ExternalNavigation),
    /// A custom effect ran.
    CustomEffectRan(CustomEffectRan),
}

impl NavigationEventKind {
    /// Event type name of this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ScenarioLoaded(_) => SCENARIO_LOADED_EVENT_TYPE,
            Self::SceneEntered(_) => SCENE_ENTERED_EVENT_TYPE,
            Self::BackgroundAudioStarted(_) => BACKGROUND_AUDIO_STARTED_EVENT_TYPE,
            Self::ExternalNavigation(_) => EXTERNAL_NAVIGATION_EVENT_TYPE,
            Self::CustomEffectRan(_) => CUSTOM_EFFECT_RAN_EVENT_TYPE,
        }
    }
}

/// Journal entry envelope.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NavigationEventKind,
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("NavigationEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
