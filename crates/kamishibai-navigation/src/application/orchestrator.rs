//! Scene transitions.
//!
//! The orchestrator owns the single live instance and is the only code that
//! starts or stops scene media. Each render bumps a generation counter that
//! doubles as the new instance id; a fade continuation carrying an older id
//! finds nothing to act on and does nothing.

use kamishibai_core::instance::{FadeTicket, InstanceId, LiveInstance};
use kamishibai_core::ports::{Media, Surface};
use kamishibai_core::scene::Scene;
use tracing::{debug, info};

/// Builds and tears down live scene instances.
#[derive(Debug, Default)]
pub struct TransitionOrchestrator {
    live: Option<LiveInstance>,
    generation: u64,
}

impl TransitionOrchestrator {
    /// Creates an orchestrator with nothing on screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance currently on screen.
    #[must_use]
    pub fn live(&self) -> Option<&LiveInstance> {
        self.live.as_ref()
    }

    /// Number of renders performed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces whatever is on screen with a fresh copy of `scene`.
    ///
    /// The previous instance's music is paused and the instance detached
    /// before the new copy exists. The new copy starts fully hidden and its
    /// music waits for the fade continuation.
    pub fn render_scene(
        &mut self,
        index: usize,
        scene: &Scene,
        surface: &mut dyn Surface,
        media: &mut dyn Media,
    ) -> InstanceId {
        self.teardown(surface, media);

        self.generation += 1;
        let id = InstanceId(self.generation);
        let mut instance = LiveInstance::from_template(id, index, scene);
        instance.hide_all();
        if let Some(src) = instance.absorb_background_image() {
            debug!(%id, %src, "background image absorbed");
        }

        let instance = self.live.insert(instance);
        surface.attach(instance);
        for element in instance.elements.ids() {
            surface.bind_click(id, element);
        }
        surface.fade_in(id, FadeTicket { instance: id });

        info!(%id, scene = index, name = %scene.name, "scene rendered");
        id
    }

    /// Fade continuation: reveals the instance and starts its music, unless
    /// the ticket belongs to an instance that is no longer on screen or the
    /// music already started. Returns the number of tracks started.
    pub fn complete_fade_in(&mut self, ticket: FadeTicket, media: &mut dyn Media) -> Option<usize> {
        let Some(instance) = self
            .live
            .as_mut()
            .filter(|instance| instance.id == ticket.instance)
        else {
            debug!(instance = %ticket.instance, "stale fade continuation ignored");
            return None;
        };
        if instance.audio_started() {
            debug!(instance = %ticket.instance, "fade continuation already ran");
            return None;
        }

        instance.reveal_all();
        let tracks = instance.background_audio();
        for handle in &tracks {
            media.play(handle);
        }
        instance.mark_audio_started();
        Some(tracks.len())
    }

    /// Pauses the live instance's music and detaches it. Safe to call with
    /// nothing on screen.
    pub fn teardown(&mut self, surface: &mut dyn Surface, media: &mut dyn Media) {
        let Some(instance) = self.live.take() else {
            return;
        };
        for handle in instance.background_audio() {
            media.pause(&handle);
        }
        surface.detach(instance.id);
        debug!(id = %instance.id, "live instance discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kamishibai_core::element::{ElementBody, ElementId, ElementTree, Visibility};
    use kamishibai_core::instance::Background;
    use kamishibai_core::ports::{AudioHandle, AudioOwner};
    use kamishibai_core::scene::{AudioRole, AudioTrack};
    use kamishibai_test_support::{
        Call, CallLog, RecordingMedia, RecordingSurface, scene_with_root_action,
    };

    fn collaborators() -> (CallLog, RecordingSurface, RecordingMedia) {
        let log = CallLog::new();
        (
            log.clone(),
            RecordingSurface(log.clone()),
            RecordingMedia(log),
        )
    }

    fn plain(name: &str) -> Scene {
        scene_with_root_action(name, None)
    }

    fn bgm(instance: InstanceId, name: &str) -> AudioHandle {
        AudioHandle {
            owner: AudioOwner::Instance(instance),
            track_id: format!("bgm-{name}"),
            src: format!("audio/{name}.ogg"),
        }
    }

    fn scene_with_backdrop() -> Scene {
        let mut elements = ElementTree::new(ElementBody::Container, None);
        elements
            .add_child(
                ElementId::ROOT,
                None,
                ElementBody::BackgroundImage {
                    src: "img/bg.png".into(),
                },
                None,
            )
            .unwrap();
        Scene::new(
            "backdrop",
            elements,
            vec![AudioTrack {
                id: "bgm-backdrop".into(),
                src: "audio/backdrop.ogg".into(),
                role: AudioRole::Background,
            }],
        )
    }

    #[test]
    fn test_render_scene_performs_steps_in_order() {
        // Arrange
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();
        let scene = scene_with_root_action("a", None);

        // Act
        let id = orchestrator.render_scene(0, &scene, &mut surface, &mut media);

        // Assert
        let calls = log.calls();
        assert!(matches!(&calls[0], Call::Attach(instance) if instance.id == id));
        assert_eq!(calls[1], Call::BindClick(id, ElementId(0)));
        assert_eq!(calls[2], Call::BindClick(id, ElementId(1)));
        assert_eq!(calls[3], Call::FadeIn(FadeTicket { instance: id }));
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn test_attached_instance_is_fully_hidden() {
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();

        orchestrator.render_scene(0, &plain("a"), &mut surface, &mut media);

        let attached = log.last_attached().unwrap();
        assert!(
            attached
                .elements
                .iter()
                .all(|element| element.visibility == Visibility::Hidden)
        );
    }

    #[test]
    fn test_background_image_is_absorbed_before_attach() {
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();

        let id = orchestrator.render_scene(0, &scene_with_backdrop(), &mut surface, &mut media);

        let attached = log.last_attached().unwrap();
        assert_eq!(attached.background, Background::Image("img/bg.png".into()));
        assert_eq!(attached.elements.len(), 1);
        let binds = log
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::BindClick(..)))
            .count();
        assert_eq!(binds, 1);
        assert_eq!(orchestrator.live().unwrap().id, id);
    }

    #[test]
    fn test_music_waits_for_fade_continuation() {
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();

        let id = orchestrator.render_scene(0, &plain("a"), &mut surface, &mut media);
        assert!(log.playing().is_empty());

        let started = orchestrator.complete_fade_in(FadeTicket { instance: id }, &mut media);

        assert_eq!(started, Some(1));
        assert!(log.playing().contains(&bgm(id, "a")));
        assert!(
            orchestrator
                .live()
                .unwrap()
                .elements
                .iter()
                .all(|element| element.visibility == Visibility::Visible)
        );
    }

    #[test]
    fn test_fade_continuation_runs_once() {
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();
        let id = orchestrator.render_scene(0, &plain("a"), &mut surface, &mut media);
        let ticket = FadeTicket { instance: id };

        orchestrator.complete_fade_in(ticket, &mut media);
        let again = orchestrator.complete_fade_in(ticket, &mut media);

        assert_eq!(again, None);
        let plays = log
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Play(_)))
            .count();
        assert_eq!(plays, 1);
    }

    #[test]
    fn test_stale_fade_continuation_is_noop() {
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();
        let first = orchestrator.render_scene(0, &plain("a"), &mut surface, &mut media);
        let second = orchestrator.render_scene(1, &plain("b"), &mut surface, &mut media);

        let stale = orchestrator.complete_fade_in(FadeTicket { instance: first }, &mut media);

        assert_eq!(stale, None);
        assert!(log.playing().is_empty());
        assert!(second > first);
    }

    #[test]
    fn test_previous_music_paused_before_detach_and_next_attach() {
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();
        let first = orchestrator.render_scene(0, &plain("a"), &mut surface, &mut media);
        orchestrator.complete_fade_in(FadeTicket { instance: first }, &mut media);
        log.clear();

        let second = orchestrator.render_scene(1, &plain("b"), &mut surface, &mut media);

        let calls = log.calls();
        assert_eq!(calls[0], Call::Pause(bgm(first, "a")));
        assert_eq!(calls[1], Call::Detach(first));
        assert!(matches!(&calls[2], Call::Attach(instance) if instance.id == second));
        assert!(log.playing().is_empty());
    }

    #[test]
    fn test_teardown_without_live_instance_is_noop() {
        let (log, mut surface, mut media) = collaborators();
        let mut orchestrator = TransitionOrchestrator::new();

        orchestrator.teardown(&mut surface, &mut media);

        assert!(log.calls().is_empty());
        assert_eq!(orchestrator.generation(), 0);
    }
}
