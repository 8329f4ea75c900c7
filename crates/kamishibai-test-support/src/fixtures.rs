//! Scenario fixtures.

use kamishibai_core::action::Action;
use kamishibai_core::element::{ElementBody, ElementId, ElementTree};
use kamishibai_core::scene::{AudioRole, AudioTrack, Scenario, Scene};

/// Track id of the click sound every fixture scenario carries.
pub const CLICK_SOUND_ID: &str = "se-click";

/// A scene whose root declares `root_action` and holds one text child named
/// `"body"` without an action of its own, plus one background track named
/// `"bgm-<name>"`.
///
/// # Panics
///
/// Never; the root always exists.
#[must_use]
pub fn scene_with_root_action(name: &str, root_action: Option<Action>) -> Scene {
    let mut elements = ElementTree::new(ElementBody::Container, root_action);
    elements
        .add_child(
            ElementId::ROOT,
            Some("body".to_owned()),
            ElementBody::Text {
                html: format!("<p>{name}</p>"),
            },
            None,
        )
        .unwrap();
    Scene::new(
        name,
        elements,
        vec![AudioTrack {
            id: format!("bgm-{name}"),
            src: format!("audio/{name}.ogg"),
            role: AudioRole::Background,
        }],
    )
}

/// Wraps scenes into a scenario with one click-sound track.
///
/// # Panics
///
/// Panics if `scenes` is empty.
#[must_use]
pub fn scenario_of(scenes: Vec<Scene>) -> Scenario {
    Scenario::new(
        "fixture",
        scenes,
        vec![AudioTrack {
            id: CLICK_SOUND_ID.to_owned(),
            src: "audio/click.ogg".to_owned(),
            role: AudioRole::ClickSound,
        }],
        "fixture-hash",
    )
    .unwrap()
}

/// A scenario of plain scenes with the given names and no actions.
#[must_use]
pub fn linear_scenario(names: &[&str]) -> Scenario {
    scenario_of(
        names
            .iter()
            .map(|name| scene_with_root_action(name, None))
            .collect(),
    )
}
