//! Registered custom effects.
//!
//! A `custom` action names a handler registered here ahead of time and
//! carries structured parameters for it. Nothing else is executable from a
//! scenario document.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use kamishibai_core::error::EngineError;
use thiserror::Error;

use crate::domain::requests::NavigationRequest;

/// What a handler sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    /// Index of the scene that was clicked.
    pub current_scene: usize,
    /// Number of scenes in the scenario.
    pub scene_count: usize,
    /// Parameters from the action declaration.
    pub params: &'a serde_json::Value,
}

/// What the engine should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    /// Stay on the current scene.
    Stay,
    /// Navigate; applied only because the handler succeeded.
    Navigate(NavigationRequest),
}

/// A handler failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EffectError(pub String);

/// A named effect handler.
pub trait CustomEffect: Send + Sync {
    /// Runs the effect.
    ///
    /// # Errors
    ///
    /// Returns `EffectError` if the effect cannot be carried out.
    fn run(&self, context: &EffectContext<'_>) -> Result<EffectOutcome, EffectError>;
}

struct FnEffect<F>(F);

impl<F> CustomEffect for FnEffect<F>
where
    F: Fn(&EffectContext<'_>) -> Result<EffectOutcome, EffectError> + Send + Sync,
{
    fn run(&self, context: &EffectContext<'_>) -> Result<EffectOutcome, EffectError> {
        (self.0)(context)
    }
}

/// Handlers by name.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    handlers: HashMap<String, Arc<dyn CustomEffect>>,
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

impl EffectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `effect` under `name`, replacing any earlier handler.
    pub fn register(&mut self, name: impl Into<String>, effect: impl CustomEffect + 'static) {
        self.handlers.insert(name.into(), Arc::new(effect));
    }

    /// Registers a closure under `name`.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, effect: F)
    where
        F: Fn(&EffectContext<'_>) -> Result<EffectOutcome, EffectError> + Send + Sync + 'static,
    {
        self.register(name, FnEffect(effect));
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs the handler registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownEffect` if no handler is registered and
    /// `EngineError::Effect` if the handler fails.
    pub fn run(
        &self,
        name: &str,
        context: &EffectContext<'_>,
    ) -> Result<EffectOutcome, EngineError> {
        let effect = self
            .handlers
            .get(name)
            .ok_or_else(|| EngineError::UnknownEffect(name.to_owned()))?;
        effect.run(context).map_err(|e| EngineError::Effect {
            handler: name.to_owned(),
            message: e.0,
        })
    }
}
