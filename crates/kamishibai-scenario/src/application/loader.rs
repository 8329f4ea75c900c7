//! Turns presentation documents into scenarios.

use std::collections::HashSet;

use kamishibai_core::element::{ElementBody, ElementId, ElementTree};
use kamishibai_core::error::EngineError;
use kamishibai_core::scene::{AudioRole, Scenario, Scene};
use pulldown_cmark::{Parser, html};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::document::{DocumentFormat, ElementDocument, ScenarioDocument, SceneDocument};

/// Parses and compiles document text into a scenario.
///
/// # Errors
///
/// Returns `EngineError::InvalidScenario` for malformed documents and
/// `EngineError::ScenarioNotFound` if the document holds no scenes.
pub fn load_from_str(text: &str, format: DocumentFormat) -> Result<Scenario, EngineError> {
    let document = ScenarioDocument::parse(text, format)?;
    let scenario = compile(&document, &version_hash(text))?;
    info!(
        title = %scenario.title,
        scenes = scenario.scene_count(),
        version_hash = %scenario.version_hash,
        "scenario loaded"
    );
    Ok(scenario)
}

/// Compiles a parsed document.
///
/// # Errors
///
/// Returns `EngineError::InvalidScenario` if any scene is invalid and
/// `EngineError::ScenarioNotFound` if there are no scenes.
pub fn compile(document: &ScenarioDocument, version_hash: &str) -> Result<Scenario, EngineError> {
    let scenes = document
        .scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| compile_scene(index, scene))
        .collect::<Result<Vec<_>, _>>()?;

    let click_sounds = document
        .click_sounds
        .iter()
        .map(|track| track.to_track(AudioRole::ClickSound))
        .collect();

    Scenario::new(
        document.title.clone(),
        scenes,
        click_sounds,
        version_hash.to_owned(),
    )
}

/// SHA-256 hex digest of the document text.
#[must_use]
pub fn version_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

fn compile_scene(index: usize, document: &SceneDocument) -> Result<Scene, EngineError> {
    let name = document
        .name
        .clone()
        .unwrap_or_else(|| format!("scene-{}", index + 1));
    let in_scene = |err: EngineError| match err {
        EngineError::InvalidScenario(msg) => {
            EngineError::InvalidScenario(format!("scene {name}: {msg}"))
        }
        other => other,
    };

    let root_action = document
        .action
        .as_ref()
        .map(|action| action.to_action())
        .transpose()
        .map_err(in_scene)?;
    let mut tree = ElementTree::new(ElementBody::Container, root_action);
    let mut seen = HashSet::new();
    for element in &document.elements {
        add_element(&mut tree, ElementId::ROOT, element, &mut seen).map_err(in_scene)?;
    }

    let audio = document
        .audio
        .iter()
        .map(|track| track.to_track(AudioRole::Background))
        .collect();

    Ok(Scene::new(name, tree, audio))
}

fn add_element(
    tree: &mut ElementTree,
    parent: ElementId,
    document: &ElementDocument,
    seen: &mut HashSet<String>,
) -> Result<(), EngineError> {
    if let Some(id) = &document.id {
        if !seen.insert(id.clone()) {
            return Err(EngineError::InvalidScenario(format!(
                "duplicate element id {id}"
            )));
        }
    }

    let body = element_body(document)?;
    let action = document
        .action
        .as_ref()
        .map(|action| action.to_action())
        .transpose()?;
    let id = tree
        .add_child(parent, document.id.clone(), body, action)
        .ok_or_else(|| EngineError::InvalidScenario("element parent vanished".to_owned()))?;

    for child in &document.children {
        add_element(tree, id, child, seen)?;
    }
    Ok(())
}

fn element_body(document: &ElementDocument) -> Result<ElementBody, EngineError> {
    match (&document.text, &document.image, &document.background_image) {
        (None, None, None) => Ok(ElementBody::Container),
        (Some(text), None, None) => Ok(ElementBody::Text {
            html: render_markdown(text),
        }),
        (None, Some(src), None) => Ok(ElementBody::Image { src: src.clone() }),
        (None, None, Some(src)) => Ok(ElementBody::BackgroundImage { src: src.clone() }),
        _ => Err(EngineError::InvalidScenario(format!(
            "element {} sets more than one of text, image, background_image",
            document.id.as_deref().unwrap_or("<anonymous>")
        ))),
    }
}

fn render_markdown(text: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(text));
    out
}
