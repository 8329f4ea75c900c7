//! Recording collaborators: port implementations that log every call.

use kamishibai_core::element::ElementId;
use kamishibai_core::instance::{FadeTicket, InstanceId, LiveInstance};
use kamishibai_core::ports::{AudioHandle, ExternalNavigator, Media, Notifier, Surface};

use crate::call_log::{Call, CallLog};

/// A surface that records attach/detach/bind/fade calls.
#[derive(Debug, Clone)]
pub struct RecordingSurface(pub CallLog);

impl Surface for RecordingSurface {
    fn attach(&mut self, instance: &LiveInstance) {
        self.0.push(Call::Attach(Box::new(instance.clone())));
    }

    fn detach(&mut self, instance: InstanceId) {
        self.0.push(Call::Detach(instance));
    }

    fn bind_click(&mut self, instance: InstanceId, element: ElementId) {
        self.0.push(Call::BindClick(instance, element));
    }

    fn fade_in(&mut self, _instance: InstanceId, ticket: FadeTicket) {
        self.0.push(Call::FadeIn(ticket));
    }
}

/// Media that records play/pause/seek calls.
#[derive(Debug, Clone)]
pub struct RecordingMedia(pub CallLog);

impl Media for RecordingMedia {
    fn play(&mut self, handle: &AudioHandle) {
        self.0.push(Call::Play(handle.clone()));
    }

    fn pause(&mut self, handle: &AudioHandle) {
        self.0.push(Call::Pause(handle.clone()));
    }

    fn seek_to_start(&mut self, handle: &AudioHandle) {
        self.0.push(Call::SeekToStart(handle.clone()));
    }
}

/// An external navigator that records requested urls.
#[derive(Debug, Clone)]
pub struct RecordingNavigator(pub CallLog);

impl ExternalNavigator for RecordingNavigator {
    fn open(&mut self, url: &str) {
        self.0.push(Call::OpenUrl(url.to_owned()));
    }
}

/// A notifier that records shown messages.
#[derive(Debug, Clone)]
pub struct RecordingNotifier(pub CallLog);

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.0.push(Call::Notify(message.to_owned()));
    }
}
