//! Scenario and scene templates.
//!
//! Templates are immutable once loaded. The engine never mutates a
//! [`Scene`]; it deep-copies one into a live instance for display.

use serde::Serialize;

use crate::element::{ElementId, ElementTree};
use crate::error::EngineError;

/// Purpose of an audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioRole {
    /// Looping scene music, played after the scene fades in.
    Background,
    /// Feedback sound replayed from the start on every click.
    ClickSound,
}

/// An audio track reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioTrack {
    /// Author-given identifier.
    pub id: String,
    /// Media source reference.
    pub src: String,
    /// What the track is used for.
    pub role: AudioRole,
}

/// One presentation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Author-given scene name.
    pub name: String,
    /// Content tree, including any action declarations.
    pub elements: ElementTree,
    /// Audio tracks owned by the scene.
    pub audio: Vec<AudioTrack>,
    /// Element to absorb into the scene background, if any.
    pub background_image: Option<ElementId>,
}

impl Scene {
    /// Builds a scene, picking the first background-image element as the
    /// background reference.
    #[must_use]
    pub fn new(name: impl Into<String>, elements: ElementTree, audio: Vec<AudioTrack>) -> Self {
        let background_image = elements.first_background_image().map(|(id, _)| id);
        Self {
            name: name.into(),
            elements,
            audio,
            background_image,
        }
    }

}

/// The tracks in `audio` that play once a scene has faded in.
pub fn background_tracks(audio: &[AudioTrack]) -> impl Iterator<Item = &AudioTrack> {
    audio
        .iter()
        .filter(|track| track.role == AudioRole::Background)
}

/// The full ordered collection of scenes for one presentation session.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Presentation title.
    pub title: String,
    scenes: Vec<Scene>,
    /// Scenario-wide click feedback sounds.
    pub click_sounds: Vec<AudioTrack>,
    /// SHA-256 hex digest of the source document, empty if built in code.
    pub version_hash: String,
}

impl Scenario {
    /// Creates a scenario.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ScenarioNotFound` if `scenes` is empty.
    pub fn new(
        title: impl Into<String>,
        scenes: Vec<Scene>,
        click_sounds: Vec<AudioTrack>,
        version_hash: impl Into<String>,
    ) -> Result<Self, EngineError> {
        if scenes.is_empty() {
            return Err(EngineError::ScenarioNotFound);
        }
        Ok(Self {
            title: title.into(),
            scenes,
            click_sounds,
            version_hash: version_hash.into(),
        })
    }

    /// Number of scenes, always at least one.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Scene at `index`.
    #[must_use]
    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// All scenes in order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Click-sound tracks only.
    pub fn click_sound_tracks(&self) -> impl Iterator<Item = &AudioTrack> {
        self.click_sounds
            .iter()
            .filter(|track| track.role == AudioRole::ClickSound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementBody;

    fn track(id: &str, role: AudioRole) -> AudioTrack {
        AudioTrack {
            id: id.to_owned(),
            src: format!("{id}.ogg"),
            role,
        }
    }

    #[test]
    fn test_empty_scenario_is_not_found() {
        let result = Scenario::new("empty", Vec::new(), Vec::new(), "");

        assert!(matches!(result, Err(EngineError::ScenarioNotFound)));
    }

    #[test]
    fn test_scene_picks_background_image_element() {
        let mut elements = ElementTree::new(ElementBody::Container, None);
        let backdrop = elements
            .add_child(
                ElementId::ROOT,
                None,
                ElementBody::BackgroundImage {
                    src: "bg.png".into(),
                },
                None,
            )
            .unwrap();

        let scene = Scene::new("opening", elements, Vec::new());

        assert_eq!(scene.background_image, Some(backdrop));
    }

    #[test]
    fn test_background_tracks_skip_click_sounds() {
        let scene = Scene::new(
            "opening",
            ElementTree::new(ElementBody::Container, None),
            vec![
                track("bgm", AudioRole::Background),
                track("se", AudioRole::ClickSound),
            ],
        );

        let ids: Vec<&str> = background_tracks(&scene.audio).map(|t| t.id.as_str()).collect();

        assert_eq!(ids, vec!["bgm"]);
    }

    #[test]
    fn test_scene_lookup_by_index() {
        let scenes = vec![
            Scene::new("a", ElementTree::new(ElementBody::Container, None), vec![]),
            Scene::new("b", ElementTree::new(ElementBody::Container, None), vec![]),
        ];
        let scenario = Scenario::new("demo", scenes, Vec::new(), "abc").unwrap();

        assert_eq!(scenario.scene_count(), 2);
        assert_eq!(scenario.scene(1).unwrap().name, "b");
        assert!(scenario.scene(2).is_none());
    }
}
