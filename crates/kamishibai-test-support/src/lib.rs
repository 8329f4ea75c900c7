//! Shared test doubles and fixtures for the Kamishibai presentation engine.

mod call_log;
mod clock;
mod collaborators;
mod fixtures;
mod rng;
mod source;

pub use call_log::{Call, CallLog};
pub use clock::{FixedClock, fixed_clock};
pub use collaborators::{RecordingMedia, RecordingNavigator, RecordingNotifier, RecordingSurface};
pub use fixtures::{CLICK_SOUND_ID, linear_scenario, scenario_of, scene_with_root_action};
pub use rng::{MockRng, SequenceRng};
pub use source::{EmptyScenarioSource, FailingScenarioSource, InMemoryScenarioSource};
