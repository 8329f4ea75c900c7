//! Engine error types.

use thiserror::Error;

/// Top-level engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The scenario document is missing or holds no scenes.
    #[error("scenario not found")]
    ScenarioNotFound,

    /// The scenario document could not be turned into scenes.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// A navigation entry point was called before `init`.
    #[error("engine is not initialized")]
    NotInitialized,

    /// A `custom` action named a handler nobody registered.
    #[error("unknown custom effect: {0}")]
    UnknownEffect(String),

    /// A registered custom effect failed.
    #[error("custom effect {handler} failed: {message}")]
    Effect {
        /// The handler name.
        handler: String,
        /// What went wrong.
        message: String,
    },

    /// An infrastructure/IO error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

/// How an error is surfaced to the person watching the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The scenario could not be found; navigation never starts.
    ScenarioNotFound,
    /// Anything else, reported with one generic message.
    Unexpected,
}

impl EngineError {
    /// Returns the user-facing class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ScenarioNotFound => ErrorClass::ScenarioNotFound,
            _ => ErrorClass::Unexpected,
        }
    }
}
