//! The presentation engine.
//!
//! One `Engine` value holds everything a presentation session needs: the
//! loaded scenario, the navigation cursor, the transition orchestrator and
//! the collaborators it drives. Every entry point runs to completion before
//! returning; hosts serialize calls (a mutex or a single UI thread).

use std::collections::VecDeque;
use std::fmt;

use kamishibai_core::clock::Clock;
use kamishibai_core::element::ElementId;
use kamishibai_core::error::{EngineError, ErrorClass};
use kamishibai_core::event::EventMetadata;
use kamishibai_core::instance::{FadeTicket, InstanceId, LiveInstance};
use kamishibai_core::ports::{AudioHandle, AudioOwner, ExternalNavigator, Media, Notifier, Surface};
use kamishibai_core::rng::DeterministicRng;
use kamishibai_core::scene::Scenario;
use kamishibai_core::source::ScenarioSource;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::effects::{EffectContext, EffectOutcome, EffectRegistry};
use crate::application::orchestrator::TransitionOrchestrator;
use crate::application::resolver::{self, Dispatch};
use crate::domain::cursor::NavigationCursor;
use crate::domain::events::{
    BackgroundAudioStarted, CustomEffectRan, ExternalNavigation, NavigationEvent,
    NavigationEventKind, ScenarioLoaded, SceneEntered,
};
use crate::domain::requests::NavigationRequest;

/// Journal entries kept before the oldest are dropped.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1024;

/// The collaborators an engine drives.
pub struct Collaborators {
    /// Output surface.
    pub surface: Box<dyn Surface>,
    /// Audio playback.
    pub media: Box<dyn Media>,
    /// Target of `open-url` actions.
    pub navigator: Box<dyn ExternalNavigator>,
    /// Blocking user notifications.
    pub notifier: Box<dyn Notifier>,
    /// Source of randomness for jump actions.
    pub rng: Box<dyn DeterministicRng>,
    /// Timestamps for the journal.
    pub clock: Box<dyn Clock>,
}

/// Notification texts, one per error class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown when the scenario is missing or empty.
    pub scenario_not_found: String,
    /// Shown for every other failure.
    pub unexpected_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            scenario_not_found: "The scenario could not be found.".to_owned(),
            unexpected_error: "An unexpected error occurred.".to_owned(),
        }
    }
}

/// What a click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The click named an instance or element that is no longer on screen.
    Ignored,
    /// The cursor moved (possibly onto the same scene) and a new instance
    /// was rendered.
    Navigated {
        /// The new scene index.
        index: usize,
    },
    /// The outer surface was redirected.
    OpenedUrl {
        /// The target location.
        url: String,
    },
    /// A custom effect ran.
    EffectRan {
        /// Handler name.
        handler: String,
        /// Where the effect navigated to, if anywhere.
        navigated_to: Option<usize>,
    },
    /// The action was `none`.
    Nothing,
}

struct Session {
    scenario: Scenario,
    cursor: NavigationCursor,
}

/// The scene navigation engine.
pub struct Engine {
    collaborators: Collaborators,
    effects: EffectRegistry,
    messages: Messages,
    session: Option<Session>,
    orchestrator: TransitionOrchestrator,
    journal: VecDeque<NavigationEvent>,
    journal_capacity: usize,
    recorded: i64,
    last_external_url: Option<String>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("current_scene", &self.current_scene())
            .field("scene_count", &self.scene_count())
            .field("generation", &self.orchestrator.generation())
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine with no scenario loaded.
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            effects: EffectRegistry::new(),
            messages: Messages::default(),
            session: None,
            orchestrator: TransitionOrchestrator::new(),
            journal: VecDeque::new(),
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
            recorded: 0,
            last_external_url: None,
        }
    }

    /// Replaces the custom effect registry.
    #[must_use]
    pub fn with_effects(mut self, effects: EffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    /// Replaces the notification texts.
    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Keeps at most `capacity` journal entries, dropping the oldest first.
    /// Sequence numbers keep counting across dropped entries.
    #[must_use]
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity.max(1);
        self
    }

    /// Loads the scenario from `source` and shows its first scene.
    /// A running session is disposed first.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ScenarioNotFound` if the source has no scenes,
    /// or whatever else the source reports. Every failure is also shown to
    /// the user through the notifier; navigation never starts.
    pub async fn init(&mut self, source: &dyn ScenarioSource) -> Result<usize, EngineError> {
        if self.session.is_some() {
            self.dispose();
        }

        let scenario = match source.load_scenario().await {
            Ok(scenario) => scenario,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };
        let cursor = NavigationCursor::new(scenario.scene_count())?;

        info!(
            title = %scenario.title,
            scenes = scenario.scene_count(),
            "presentation session started"
        );
        self.record(NavigationEventKind::ScenarioLoaded(ScenarioLoaded {
            title: scenario.title.clone(),
            scene_count: scenario.scene_count(),
            version_hash: scenario.version_hash.clone(),
        }));
        self.session = Some(Session { scenario, cursor });

        self.transition(NavigationRequest::First, true)
    }

    /// Stops scene music, takes the live instance off screen and forgets the
    /// scenario and journal. Never fails; safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.orchestrator.teardown(
            self.collaborators.surface.as_mut(),
            self.collaborators.media.as_mut(),
        );
        if self.session.take().is_some() {
            info!("presentation session disposed");
        }
        self.journal.clear();
        self.recorded = 0;
        self.last_external_url = None;
    }

    /// Jumps to `target`, clamped into range, and renders it.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInitialized` before `init`.
    pub fn go_to_scene(&mut self, target: i64) -> Result<usize, EngineError> {
        self.navigate(NavigationRequest::Absolute(target))
    }

    /// Jumps to the first scene.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInitialized` before `init`.
    pub fn go_first(&mut self) -> Result<usize, EngineError> {
        self.navigate(NavigationRequest::First)
    }

    /// Moves by `delta` scenes, clamped into range.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInitialized` before `init`.
    pub fn go_relative(&mut self, delta: i64) -> Result<usize, EngineError> {
        self.navigate(NavigationRequest::Relative(delta))
    }

    /// The "next" control.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInitialized` before `init`.
    pub fn go_next(&mut self) -> Result<usize, EngineError> {
        self.navigate(NavigationRequest::Next)
    }

    /// The "previous" control.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInitialized` before `init`.
    pub fn go_previous(&mut self) -> Result<usize, EngineError> {
        self.navigate(NavigationRequest::Previous)
    }

    /// Applies a navigation request and renders the resulting scene, even
    /// when the index did not change.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInitialized` before `init`.
    pub fn navigate(&mut self, request: NavigationRequest) -> Result<usize, EngineError> {
        self.transition(request, false)
    }

    /// Handles a click on `element` of the live instance `instance`.
    ///
    /// The scenario click sounds restart first, then the governing action
    /// runs. Clicks that name an instance no longer on screen, or an element
    /// it does not hold, are ignored.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInitialized` before `init`, and
    /// `EngineError::UnknownEffect` / `EngineError::Effect` when a custom
    /// effect cannot run; those are also shown through the notifier and
    /// leave the cursor where it was.
    pub fn click(
        &mut self,
        instance: InstanceId,
        element: ElementId,
    ) -> Result<ClickOutcome, EngineError> {
        let session = self.session.as_ref().ok_or(EngineError::NotInitialized)?;
        let Some(live) = self
            .orchestrator
            .live()
            .filter(|live| live.id == instance && live.elements.contains(element))
        else {
            debug!(%instance, element = element.0, "click on stale target ignored");
            return Ok(ClickOutcome::Ignored);
        };

        let action = resolver::resolve_action(&live.elements, element);
        let click_sounds: Vec<AudioHandle> = session
            .scenario
            .click_sound_tracks()
            .map(|track| AudioHandle::new(AudioOwner::Scenario, track))
            .collect();
        let current_scene = session.cursor.current();
        let scene_count = session.cursor.scene_count();

        for handle in &click_sounds {
            self.collaborators.media.seek_to_start(handle);
            self.collaborators.media.play(handle);
        }

        debug!(%instance, element = element.0, kind = action.kind(), "click resolved");
        match resolver::plan(&action, self.collaborators.rng.as_mut()) {
            Dispatch::Navigate(request) => {
                let index = self.navigate(request)?;
                Ok(ClickOutcome::Navigated { index })
            }
            Dispatch::OpenUrl(url) => {
                info!(%url, "redirecting outer surface");
                self.collaborators.navigator.open(&url);
                self.last_external_url = Some(url.clone());
                self.record(NavigationEventKind::ExternalNavigation(ExternalNavigation {
                    url: url.clone(),
                }));
                Ok(ClickOutcome::OpenedUrl { url })
            }
            Dispatch::Custom { handler, params } => {
                let context = EffectContext {
                    current_scene,
                    scene_count,
                    params: &params,
                };
                let outcome = match self.effects.run(&handler, &context) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        self.report(&err);
                        return Err(err);
                    }
                };
                let navigated_to = match outcome {
                    EffectOutcome::Stay => None,
                    EffectOutcome::Navigate(request) => Some(self.navigate(request)?),
                };
                self.record(NavigationEventKind::CustomEffectRan(CustomEffectRan {
                    handler: handler.clone(),
                    navigated_to,
                }));
                Ok(ClickOutcome::EffectRan {
                    handler,
                    navigated_to,
                })
            }
            Dispatch::Nothing => Ok(ClickOutcome::Nothing),
        }
    }

    /// Fade continuation handed back by the surface. Starts the scene music
    /// if `ticket` still belongs to the live instance; otherwise does
    /// nothing. Returns whether music was started.
    pub fn complete_fade_in(&mut self, ticket: FadeTicket) -> bool {
        let Some(tracks) = self
            .orchestrator
            .complete_fade_in(ticket, self.collaborators.media.as_mut())
        else {
            return false;
        };
        self.record(NavigationEventKind::BackgroundAudioStarted(
            BackgroundAudioStarted {
                instance: ticket.instance,
                tracks,
            },
        ));
        true
    }

    /// Shows the notification matching the class of `err`.
    pub fn report(&mut self, err: &EngineError) {
        let message = match err.class() {
            ErrorClass::ScenarioNotFound => &self.messages.scenario_not_found,
            ErrorClass::Unexpected => &self.messages.unexpected_error,
        };
        warn!(error = %err, "notifying user of failure");
        self.collaborators.notifier.notify(message);
    }

    /// Whether a scenario is loaded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Current scene index.
    #[must_use]
    pub fn current_scene(&self) -> Option<usize> {
        self.session.as_ref().map(|session| session.cursor.current())
    }

    /// Number of scenes.
    #[must_use]
    pub fn scene_count(&self) -> Option<usize> {
        self.session
            .as_ref()
            .map(|session| session.cursor.scene_count())
    }

    /// The loaded scenario.
    #[must_use]
    pub fn scenario(&self) -> Option<&Scenario> {
        self.session.as_ref().map(|session| &session.scenario)
    }

    /// The instance on screen.
    #[must_use]
    pub fn live_instance(&self) -> Option<&LiveInstance> {
        self.orchestrator.live()
    }

    /// Most recent journal entries of this session, oldest first.
    #[must_use]
    pub fn history(&self) -> &VecDeque<NavigationEvent> {
        &self.journal
    }

    /// Where the last `open-url` action sent the outer surface.
    #[must_use]
    pub fn last_external_url(&self) -> Option<&str> {
        self.last_external_url.as_deref()
    }

    /// Moves the cursor, then rebuilds the screen for the new scene.
    fn transition(
        &mut self,
        request: NavigationRequest,
        initial: bool,
    ) -> Result<usize, EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NotInitialized)?;
        let from = session.cursor.current();
        let index = request.apply(&mut session.cursor);
        let scene = session.scenario.scene(index).ok_or_else(|| {
            EngineError::Infrastructure(format!("cursor landed outside scenario at {index}"))
        })?;

        let instance = self.orchestrator.render_scene(
            index,
            scene,
            self.collaborators.surface.as_mut(),
            self.collaborators.media.as_mut(),
        );

        self.record(NavigationEventKind::SceneEntered(SceneEntered {
            from: (!initial).then_some(from),
            to: index,
            requested: request,
            instance,
        }));
        Ok(index)
    }

    fn record(&mut self, kind: NavigationEventKind) {
        self.recorded += 1;
        let event = NavigationEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                sequence_number: self.recorded,
                occurred_at: self.collaborators.clock.now(),
            },
            kind,
        };
        if self.journal.len() == self.journal_capacity {
            self.journal.pop_front();
        }
        self.journal.push_back(event);
    }
}
