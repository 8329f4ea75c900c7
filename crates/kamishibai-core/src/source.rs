//! Scenario source abstraction.

use async_trait::async_trait;

use crate::error::EngineError;
use crate::scene::Scenario;

/// Somewhere a scenario can be loaded from.
#[async_trait]
pub trait ScenarioSource: Send + Sync {
    /// Loads the scenario.
    ///
    /// Implementations return `EngineError::ScenarioNotFound` when there is
    /// no scenario or it holds no scenes.
    async fn load_scenario(&self) -> Result<Scenario, EngineError>;
}
