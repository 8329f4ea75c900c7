//! Headless collaborators for serving the engine over HTTP.
//!
//! There is no screen or speaker behind the server. The surface records
//! what is attached and turns every fade-in into a timer that reports back
//! to the engine; media, navigation and notifications go to the log.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kamishibai_core::clock::SystemClock;
use kamishibai_core::element::ElementId;
use kamishibai_core::instance::{FadeTicket, InstanceId, LiveInstance};
use kamishibai_core::ports::{AudioHandle, ExternalNavigator, Media, Notifier, Surface};
use kamishibai_core::rng::{DeterministicRng, SystemRng};
use kamishibai_navigation::application::engine::{Collaborators, Engine};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Surface that forwards fade-in tickets to [`run_fade_timers`].
#[derive(Debug)]
pub struct HeadlessSurface {
    attached: Option<InstanceId>,
    fades: UnboundedSender<FadeTicket>,
}

impl HeadlessSurface {
    /// Creates a surface that sends fade tickets on `fades`.
    #[must_use]
    pub fn new(fades: UnboundedSender<FadeTicket>) -> Self {
        Self {
            attached: None,
            fades,
        }
    }
}

impl Surface for HeadlessSurface {
    fn attach(&mut self, instance: &LiveInstance) {
        if let Some(previous) = self.attached {
            warn!(%previous, "attach while another instance is still attached");
        }
        self.attached = Some(instance.id);
        info!(
            instance = %instance.id,
            scene = %instance.scene_name,
            elements = instance.elements.len(),
            "instance attached"
        );
    }

    fn detach(&mut self, instance: InstanceId) {
        if self.attached == Some(instance) {
            self.attached = None;
        }
        debug!(%instance, "instance detached");
    }

    fn bind_click(&mut self, instance: InstanceId, element: ElementId) {
        debug!(%instance, element = element.0, "click bound");
    }

    fn fade_in(&mut self, instance: InstanceId, ticket: FadeTicket) {
        if self.fades.send(ticket).is_err() {
            warn!(%instance, "fade timer is gone; scene music will not start");
        }
    }
}

/// Media backend that tracks which handles would be playing.
#[derive(Debug, Default)]
pub struct LoggingMedia {
    playing: HashSet<AudioHandle>,
}

impl LoggingMedia {
    /// Number of handles currently playing.
    #[must_use]
    pub fn playing(&self) -> usize {
        self.playing.len()
    }
}

impl Media for LoggingMedia {
    fn play(&mut self, handle: &AudioHandle) {
        self.playing.insert(handle.clone());
        info!(track = %handle.track_id, src = %handle.src, "play");
    }

    fn pause(&mut self, handle: &AudioHandle) {
        self.playing.remove(handle);
        debug!(track = %handle.track_id, "pause");
    }

    fn seek_to_start(&mut self, handle: &AudioHandle) {
        debug!(track = %handle.track_id, "seek to start");
    }
}

/// Outer surface redirection. The server has no browser to redirect, so the
/// target is logged and exposed through the player state.
#[derive(Debug, Default)]
pub struct RedirectNavigator;

impl ExternalNavigator for RedirectNavigator {
    fn open(&mut self, url: &str) {
        info!(%url, "outer surface redirected");
    }
}

/// Notifier that writes user-facing messages to the error log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        error!(%message, "user notification");
    }
}

/// Builds an engine wired to the headless collaborators.
#[must_use]
pub fn engine(fades: UnboundedSender<FadeTicket>, rng_seed: Option<u64>) -> Engine {
    let rng: Box<dyn DeterministicRng> = match rng_seed {
        Some(seed) => Box::new(SystemRng::seeded(seed)),
        None => Box::new(SystemRng::from_os()),
    };
    Engine::new(Collaborators {
        surface: Box::new(HeadlessSurface::new(fades)),
        media: Box::new(LoggingMedia::default()),
        navigator: Box::new(RedirectNavigator),
        notifier: Box::new(LogNotifier),
        rng,
        clock: Box::new(SystemClock),
    })
}

/// Completes each fade `delay` after its ticket arrives. Tickets for
/// instances that were replaced in the meantime are no-ops in the engine.
/// Returns when every sender is dropped.
pub async fn run_fade_timers(
    engine: Arc<Mutex<Engine>>,
    mut tickets: UnboundedReceiver<FadeTicket>,
    delay: Duration,
) {
    while let Some(ticket) = tickets.recv().await {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match engine.lock() {
                Ok(mut engine) => {
                    if !engine.complete_fade_in(ticket) {
                        debug!(instance = %ticket.instance, "fade finished after scene changed");
                    }
                }
                Err(e) => warn!(error = %e, "engine mutex poisoned; fade dropped"),
            }
        });
    }
}
