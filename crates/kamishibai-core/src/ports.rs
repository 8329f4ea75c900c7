//! Collaborator ports the engine drives.
//!
//! Hosts implement these to connect the engine to a real screen, audio
//! device, and browser-like outer surface. The engine never calls back into
//! a host through closures; a host reports clicks and finished fades by
//! calling the engine's entry points with the ids it was given here.

use serde::Serialize;

use crate::element::ElementId;
use crate::instance::{FadeTicket, InstanceId, LiveInstance};
use crate::scene::AudioTrack;

/// Who owns a playing track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "scope", content = "instance", rename_all = "snake_case")]
pub enum AudioOwner {
    /// Scenario-wide sounds such as click feedback.
    Scenario,
    /// A track copied into a live instance.
    Instance(InstanceId),
}

/// Reference to one playable track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AudioHandle {
    /// Owning scope.
    pub owner: AudioOwner,
    /// Track identifier.
    pub track_id: String,
    /// Media source reference.
    pub src: String,
}

impl AudioHandle {
    /// Creates a handle for `track` owned by `owner`.
    #[must_use]
    pub fn new(owner: AudioOwner, track: &AudioTrack) -> Self {
        Self {
            owner,
            track_id: track.id.clone(),
            src: track.src.clone(),
        }
    }
}

/// The single output surface live instances are attached to.
pub trait Surface: Send {
    /// Shows a prepared instance. At most one instance is attached at a time.
    fn attach(&mut self, instance: &LiveInstance);

    /// Removes an instance and releases its click bindings.
    fn detach(&mut self, instance: InstanceId);

    /// Starts routing clicks on `element` to `Engine::click`.
    fn bind_click(&mut self, instance: InstanceId, element: ElementId);

    /// Starts the fade-in of every element of the instance. When it finishes
    /// the host hands `ticket` back to `Engine::complete_fade_in`.
    fn fade_in(&mut self, instance: InstanceId, ticket: FadeTicket);
}

/// Audio playback.
pub trait Media: Send {
    /// Starts or resumes playback.
    fn play(&mut self, handle: &AudioHandle);

    /// Pauses playback without resetting the position.
    fn pause(&mut self, handle: &AudioHandle);

    /// Moves the playback position to the start.
    fn seek_to_start(&mut self, handle: &AudioHandle);
}

/// The outer presentation surface that `open-url` actions redirect.
pub trait ExternalNavigator: Send {
    /// Replaces the current view with `url`.
    fn open(&mut self, url: &str);
}

/// Blocking user-visible notifications.
pub trait Notifier: Send {
    /// Shows `message` to the user.
    fn notify(&mut self, message: &str);
}
