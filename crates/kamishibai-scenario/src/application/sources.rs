//! Scenario sources backed by files or in-memory text.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use kamishibai_core::error::EngineError;
use kamishibai_core::scene::Scenario;
use kamishibai_core::source::ScenarioSource;
use tracing::{debug, warn};

use crate::application::loader;
use crate::domain::document::DocumentFormat;

/// Loads a scenario document from disk. The format follows the extension.
#[derive(Debug, Clone)]
pub struct FileScenarioSource {
    path: PathBuf,
}

impl FileScenarioSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ScenarioSource for FileScenarioSource {
    async fn load_scenario(&self) -> Result<Scenario, EngineError> {
        debug!(path = %self.path.display(), "reading scenario document");
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    warn!(path = %self.path.display(), "scenario document missing");
                    EngineError::ScenarioNotFound
                }
                _ => EngineError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )),
            })?;
        loader::load_from_str(&text, DocumentFormat::from_path(&self.path))
    }
}

/// Loads a scenario from document text held in memory.
#[derive(Debug, Clone)]
pub struct StaticScenarioSource {
    text: String,
    format: DocumentFormat,
}

impl StaticScenarioSource {
    /// Creates a source over YAML text.
    #[must_use]
    pub fn yaml(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: DocumentFormat::Yaml,
        }
    }

    /// Creates a source over JSON text.
    #[must_use]
    pub fn json(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: DocumentFormat::Json,
        }
    }
}

#[async_trait]
impl ScenarioSource for StaticScenarioSource {
    async fn load_scenario(&self) -> Result<Scenario, EngineError> {
        loader::load_from_str(&self.text, self.format)
    }
}
