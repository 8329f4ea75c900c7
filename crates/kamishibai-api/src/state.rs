//! Shared application state.

use std::sync::{Arc, Mutex, MutexGuard};

use kamishibai_core::error::EngineError;
use kamishibai_navigation::application::engine::Engine;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The presentation engine. Requests run one at a time against it.
    pub engine: Arc<Mutex<Engine>>,
}

impl AppState {
    /// Create new application state around an initialized engine.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Locks the engine for one synchronous operation. Never hold the guard
    /// across an await.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Infrastructure` if a previous holder panicked.
    pub fn engine(&self) -> Result<MutexGuard<'_, Engine>, EngineError> {
        self.engine
            .lock()
            .map_err(|e| EngineError::Infrastructure(format!("engine mutex poisoned: {e}")))
    }
}
