//! Serialized form of a presentation document.
//!
//! Documents are YAML or JSON. These types mirror the document layout
//! one-to-one; conversion into the core scene model happens in
//! [`crate::application::loader`].

use std::path::Path;

use kamishibai_core::action::{Action, JumpRange};
use kamishibai_core::error::EngineError;
use kamishibai_core::scene::{AudioRole, AudioTrack};
use serde::Deserialize;

/// Encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML, the default.
    Yaml,
    /// JSON.
    Json,
}

impl DocumentFormat {
    /// Picks a format from a file extension. Anything but `.json` is YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Root of a presentation document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDocument {
    /// Presentation title.
    #[serde(default)]
    pub title: String,
    /// Scenario-wide click feedback sounds.
    #[serde(default)]
    pub click_sounds: Vec<AudioDocument>,
    /// Scenes in presentation order.
    #[serde(default)]
    pub scenes: Vec<SceneDocument>,
}

impl ScenarioDocument {
    /// Parses document text.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidScenario` if the text is not a valid
    /// document in `format`.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, EngineError> {
        match format {
            DocumentFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| EngineError::InvalidScenario(format!("malformed YAML: {e}"))),
            DocumentFormat::Json => serde_json::from_str(text)
                .map_err(|e| EngineError::InvalidScenario(format!("malformed JSON: {e}"))),
        }
    }
}

/// Audio role as written in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleDocument {
    /// Scene music.
    Background,
    /// Click feedback.
    ClickSound,
}

/// An audio track entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioDocument {
    /// Track identifier.
    pub id: String,
    /// Media source reference.
    pub src: String,
    /// Explicit role; scene tracks default to background, scenario tracks
    /// to click-sound.
    #[serde(default)]
    pub role: Option<RoleDocument>,
}

impl AudioDocument {
    /// Converts to a core track, using `default_role` when none is given.
    #[must_use]
    pub fn to_track(&self, default_role: AudioRole) -> AudioTrack {
        let role = match self.role {
            Some(RoleDocument::Background) => AudioRole::Background,
            Some(RoleDocument::ClickSound) => AudioRole::ClickSound,
            None => default_role,
        };
        AudioTrack {
            id: self.id.clone(),
            src: self.src.clone(),
            role,
        }
    }
}

/// A scene entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDocument {
    /// Scene name; defaults to its position.
    #[serde(default)]
    pub name: Option<String>,
    /// Scene audio.
    #[serde(default)]
    pub audio: Vec<AudioDocument>,
    /// Action declared on the scene root.
    #[serde(default)]
    pub action: Option<ActionDocument>,
    /// Top-level elements.
    #[serde(default)]
    pub elements: Vec<ElementDocument>,
}

/// An element entry. At most one of `text`, `image` and
/// `background_image` may be set; none means a plain container.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDocument {
    /// Element identifier, unique within the scene.
    #[serde(default)]
    pub id: Option<String>,
    /// Markdown text.
    #[serde(default)]
    pub text: Option<String>,
    /// Inline image source.
    #[serde(default)]
    pub image: Option<String>,
    /// Background image source.
    #[serde(default)]
    pub background_image: Option<String>,
    /// Action declared on this element.
    #[serde(default)]
    pub action: Option<ActionDocument>,
    /// Nested elements.
    #[serde(default)]
    pub children: Vec<ElementDocument>,
}

/// An action declaration as written in documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDocument {
    /// Action kind name.
    pub kind: String,
    /// Lower jump bound.
    #[serde(default)]
    pub jump_range_min: Option<i64>,
    /// Upper jump bound.
    #[serde(default)]
    pub jump_range_max: Option<i64>,
    /// Target for `open-url`.
    #[serde(default)]
    pub url: Option<String>,
    /// Handler name for `custom`.
    #[serde(default)]
    pub handler: Option<String>,
    /// Structured parameters for `custom`.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ActionDocument {
    /// Validates the declaration and converts it to a core action.
    /// Unrecognized kinds become [`Action::Default`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidScenario` if a parameter the kind needs
    /// is missing or the jump range is inverted.
    pub fn to_action(&self) -> Result<Action, EngineError> {
        match self.kind.as_str() {
            "jump" => Ok(Action::Jump(self.jump_range()?)),
            "jump-relative" => Ok(Action::JumpRelative(self.jump_range()?)),
            "open-url" => {
                let url = self.url.clone().ok_or_else(|| {
                    EngineError::InvalidScenario("open-url action requires url".to_owned())
                })?;
                Ok(Action::OpenUrl { url })
            }
            "none" => Ok(Action::None),
            "custom" => {
                let handler = self.handler.clone().ok_or_else(|| {
                    EngineError::InvalidScenario("custom action requires handler".to_owned())
                })?;
                Ok(Action::Custom {
                    handler,
                    params: self.params.clone(),
                })
            }
            _ => Ok(Action::Default),
        }
    }

    fn jump_range(&self) -> Result<JumpRange, EngineError> {
        match (self.jump_range_min, self.jump_range_max) {
            (Some(min), Some(max)) => JumpRange::new(min, max),
            _ => Err(EngineError::InvalidScenario(format!(
                "{} action requires jump_range_min and jump_range_max",
                self.kind
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(yaml: &str) -> ActionDocument {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("story.JSON")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("story.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("story")),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn test_jump_action_converts_with_range() {
        let doc = action("{ kind: jump, jump_range_min: 0, jump_range_max: 2 }");

        assert_eq!(
            doc.to_action().unwrap(),
            Action::Jump(JumpRange::new(0, 2).unwrap())
        );
    }

    #[test]
    fn test_jump_relative_without_bounds_is_rejected() {
        let doc = action("{ kind: jump-relative, jump_range_min: 1 }");

        match doc.to_action() {
            Err(EngineError::InvalidScenario(msg)) => {
                assert_eq!(
                    msg,
                    "jump-relative action requires jump_range_min and jump_range_max"
                );
            }
            other => panic!("expected InvalidScenario, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_jump_range_is_rejected() {
        let doc = action("{ kind: jump, jump_range_min: 4, jump_range_max: 1 }");

        assert!(matches!(
            doc.to_action(),
            Err(EngineError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_open_url_requires_url() {
        let missing = action("{ kind: open-url }");
        let present = action("{ kind: open-url, url: 'https://example.org' }");

        assert!(missing.to_action().is_err());
        assert_eq!(
            present.to_action().unwrap(),
            Action::OpenUrl {
                url: "https://example.org".into()
            }
        );
    }

    #[test]
    fn test_custom_carries_handler_and_params() {
        let doc = action("{ kind: custom, handler: shake, params: { strength: 3 } }");

        assert_eq!(
            doc.to_action().unwrap(),
            Action::Custom {
                handler: "shake".into(),
                params: serde_json::json!({ "strength": 3 }),
            }
        );
    }

    #[test]
    fn test_unrecognized_kind_becomes_default() {
        assert_eq!(
            action("{ kind: teleport }").to_action().unwrap(),
            Action::Default
        );
        assert_eq!(
            action("{ kind: default }").to_action().unwrap(),
            Action::Default
        );
        assert_eq!(action("{ kind: none }").to_action().unwrap(), Action::None);
    }

    #[test]
    fn test_audio_role_defaults_by_context() {
        let doc: AudioDocument = serde_yaml::from_str("{ id: bgm, src: bgm.ogg }").unwrap();

        assert_eq!(doc.to_track(AudioRole::Background).role, AudioRole::Background);
        assert_eq!(doc.to_track(AudioRole::ClickSound).role, AudioRole::ClickSound);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = ScenarioDocument::parse("title: x\nscenez: []\n", DocumentFormat::Yaml);

        assert!(matches!(result, Err(EngineError::InvalidScenario(_))));
    }
}
