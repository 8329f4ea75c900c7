//! Test scenario sources: canned `ScenarioSource` implementations.

use async_trait::async_trait;
use kamishibai_core::error::EngineError;
use kamishibai_core::scene::Scenario;
use kamishibai_core::source::ScenarioSource;

/// Returns a clone of the held scenario on every load.
#[derive(Debug, Clone)]
pub struct InMemoryScenarioSource(pub Scenario);

#[async_trait]
impl ScenarioSource for InMemoryScenarioSource {
    async fn load_scenario(&self) -> Result<Scenario, EngineError> {
        Ok(self.0.clone())
    }
}

/// A source whose document has no scenes.
#[derive(Debug)]
pub struct EmptyScenarioSource;

#[async_trait]
impl ScenarioSource for EmptyScenarioSource {
    async fn load_scenario(&self) -> Result<Scenario, EngineError> {
        Scenario::new("empty", Vec::new(), Vec::new(), "")
    }
}

/// A source that always fails with an infrastructure error. Useful for
/// testing the generic error path.
#[derive(Debug)]
pub struct FailingScenarioSource;

#[async_trait]
impl ScenarioSource for FailingScenarioSource {
    async fn load_scenario(&self) -> Result<Scenario, EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }
}
