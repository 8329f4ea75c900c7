//! Live scene instances.
//!
//! A live instance is the disposable, currently displayed copy of a scene
//! template. Its id doubles as the transition generation: every render
//! creates a new instance with a strictly larger id.

use std::fmt;

use serde::Serialize;

use crate::element::{ElementBody, ElementId, ElementTree, Visibility};
use crate::ports::{AudioHandle, AudioOwner};
use crate::scene::{AudioTrack, Scene, background_tracks};

/// Identifier and generation of a live instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance-{}", self.0)
    }
}

/// Handed to the surface with a fade-in. Presenting it back to the engine
/// runs the fade continuation, which is a no-op once the instance is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FadeTicket {
    /// The instance that was fading in.
    pub instance: InstanceId,
}

/// How the instance paints its background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "src", rename_all = "snake_case")]
pub enum Background {
    /// Whatever the surface paints by default.
    Default,
    /// A full-bleed image.
    Image(String),
}

/// The currently rendered copy of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveInstance {
    /// Instance identifier.
    pub id: InstanceId,
    /// Index of the template this was copied from.
    pub scene_index: usize,
    /// Name of the template this was copied from.
    pub scene_name: String,
    /// Copied element tree.
    pub elements: ElementTree,
    /// Copied audio tracks.
    pub audio: Vec<AudioTrack>,
    /// Background rendering mode.
    pub background: Background,
    background_image: Option<ElementId>,
    audio_started: bool,
}

impl LiveInstance {
    /// Deep-copies a scene template.
    #[must_use]
    pub fn from_template(id: InstanceId, scene_index: usize, scene: &Scene) -> Self {
        Self {
            id,
            scene_index,
            scene_name: scene.name.clone(),
            elements: scene.elements.clone(),
            audio: scene.audio.clone(),
            background: Background::Default,
            background_image: scene.background_image,
            audio_started: false,
        }
    }

    /// Hides the root and every descendant explicitly.
    pub fn hide_all(&mut self) {
        self.elements.set_visibility_all(Visibility::Hidden);
    }

    /// Marks every element visible, as at the end of a fade-in.
    pub fn reveal_all(&mut self) {
        self.elements.set_visibility_all(Visibility::Visible);
    }

    /// Switches the background to the declared background-image element and
    /// removes that element from the tree. Returns the absorbed source.
    pub fn absorb_background_image(&mut self) -> Option<String> {
        let id = self.background_image.take()?;
        let src = match self.elements.get(id).map(|element| &element.body) {
            Some(ElementBody::BackgroundImage { src }) => src.clone(),
            _ => return None,
        };
        self.elements.remove(id);
        self.background = Background::Image(src.clone());
        Some(src)
    }

    /// Handles for this instance's background tracks.
    #[must_use]
    pub fn background_audio(&self) -> Vec<AudioHandle> {
        background_tracks(&self.audio)
            .map(|track| AudioHandle::new(AudioOwner::Instance(self.id), track))
            .collect()
    }

    /// Whether the fade continuation already started background audio.
    #[must_use]
    pub fn audio_started(&self) -> bool {
        self.audio_started
    }

    /// Records that background audio was started.
    pub fn mark_audio_started(&mut self) {
        self.audio_started = true;
    }
}
