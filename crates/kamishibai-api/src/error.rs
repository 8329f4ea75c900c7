//! Kamishibai player API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kamishibai_core::error::EngineError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the player server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The engine could not start a presentation.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `EngineError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            EngineError::ScenarioNotFound => (StatusCode::NOT_FOUND, "scenario_not_found"),
            EngineError::InvalidScenario(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_scenario")
            }
            EngineError::NotInitialized => (StatusCode::CONFLICT, "not_initialized"),
            EngineError::UnknownEffect(_) => (StatusCode::INTERNAL_SERVER_ERROR, "unknown_effect"),
            EngineError::Effect { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "effect_failed"),
            EngineError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
