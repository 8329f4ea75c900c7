//! Shared, ordered record of every collaborator call.
//!
//! All recording collaborators append to one log so tests can assert on
//! the relative order of surface, media and navigator calls.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use kamishibai_core::element::ElementId;
use kamishibai_core::instance::{FadeTicket, InstanceId, LiveInstance};
use kamishibai_core::ports::{AudioHandle, AudioOwner};

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `Surface::attach`, with a snapshot of the instance as attached.
    Attach(Box<LiveInstance>),
    /// `Surface::detach`.
    Detach(InstanceId),
    /// `Surface::bind_click`.
    BindClick(InstanceId, ElementId),
    /// `Surface::fade_in`.
    FadeIn(FadeTicket),
    /// `Media::play`.
    Play(AudioHandle),
    /// `Media::pause`.
    Pause(AudioHandle),
    /// `Media::seek_to_start`.
    SeekToStart(AudioHandle),
    /// `ExternalNavigator::open`.
    OpenUrl(String),
    /// `Notifier::notify`.
    Notify(String),
}

/// A cloneable handle to a shared call list.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Returns a snapshot of all calls so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Forgets all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Fade tickets in the order they were handed out.
    #[must_use]
    pub fn fade_tickets(&self) -> Vec<FadeTicket> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::FadeIn(ticket) => Some(ticket),
                _ => None,
            })
            .collect()
    }

    /// The most recent attached instance snapshot.
    #[must_use]
    pub fn last_attached(&self) -> Option<LiveInstance> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Call::Attach(instance) => Some(*instance),
            _ => None,
        })
    }

    /// Handles currently playing, replaying play/pause calls in order.
    #[must_use]
    pub fn playing(&self) -> HashSet<AudioHandle> {
        let mut playing = HashSet::new();
        for call in self.calls() {
            match call {
                Call::Play(handle) => {
                    playing.insert(handle);
                }
                Call::Pause(handle) => {
                    playing.remove(&handle);
                }
                _ => {}
            }
        }
        playing
    }

    /// Instances that currently have at least one playing track.
    #[must_use]
    pub fn instances_with_playing_audio(&self) -> HashSet<InstanceId> {
        self.playing()
            .into_iter()
            .filter_map(|handle| match handle.owner {
                AudioOwner::Instance(id) => Some(id),
                AudioOwner::Scenario => None,
            })
            .collect()
    }

    /// Urls passed to the external navigator.
    #[must_use]
    pub fn opened_urls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::OpenUrl(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Messages shown through the notifier.
    #[must_use]
    pub fn notifications(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Notify(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}
