//! Element trees for scenes and live instances.
//!
//! A scene's content is an indexed arena of elements linked by parent
//! pointers. Element 0 is always the scene root, and parents are always
//! inserted before their children, so arena order is a valid pre-order for
//! walking "root and all descendants".

use serde::Serialize;

use crate::action::Action;

/// Index of an element within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub usize);

impl ElementId {
    /// The scene root.
    pub const ROOT: Self = Self(0);
}

/// What an element displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementBody {
    /// A plain grouping element.
    Container,
    /// Rendered HTML text.
    Text {
        /// The HTML markup.
        html: String,
    },
    /// An inline image.
    Image {
        /// Image source reference.
        src: String,
    },
    /// An image meant to become the scene background.
    BackgroundImage {
        /// Image source reference.
        src: String,
    },
}

/// Visual state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Shown.
    Visible,
    /// Hidden, waiting for a fade-in.
    Hidden,
}

/// One node of an element tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Position in the tree.
    pub id: ElementId,
    /// Author-given identifier, unique within a scene.
    pub name: Option<String>,
    /// Parent element, `None` for the root.
    pub parent: Option<ElementId>,
    /// Child elements in document order.
    pub children: Vec<ElementId>,
    /// What the element displays.
    pub body: ElementBody,
    /// Action declared directly on this element.
    pub action: Option<Action>,
    /// Current visual state.
    pub visibility: Visibility,
}

/// An arena of elements rooted at [`ElementId::ROOT`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTree {
    nodes: Vec<Option<Element>>,
}

impl ElementTree {
    /// Creates a tree holding only a root element.
    #[must_use]
    pub fn new(body: ElementBody, action: Option<Action>) -> Self {
        Self {
            nodes: vec![Some(Element {
                id: ElementId::ROOT,
                name: None,
                parent: None,
                children: Vec::new(),
                body,
                action,
                visibility: Visibility::Visible,
            })],
        }
    }

    /// Appends a child under `parent`. Returns `None` if `parent` is not in
    /// the tree.
    pub fn add_child(
        &mut self,
        parent: ElementId,
        name: Option<String>,
        body: ElementBody,
        action: Option<Action>,
    ) -> Option<ElementId> {
        if !self.contains(parent) {
            return None;
        }
        let id = ElementId(self.nodes.len());
        self.nodes.push(Some(Element {
            id,
            name,
            parent: Some(parent),
            children: Vec::new(),
            body,
            action,
            visibility: Visibility::Visible,
        }));
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }
        Some(id)
    }

    /// Returns the element with the given id, if still present.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to an element.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Whether `id` is present in the tree.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Finds an element by its author-given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.iter()
            .find(|element| element.name.as_deref() == Some(name))
            .map(|element| element.id)
    }

    /// Iterates the root and all descendants, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().flatten()
    }

    /// Ids of the root and all descendants, parents before children.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.iter().map(|element| element.id).collect()
    }

    /// Number of elements present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// A tree always holds its root, so this is only true for a tree whose
    /// root slot was somehow vacated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walks from `from` up to the root and returns the first element that
    /// declares an action, together with that action.
    #[must_use]
    pub fn nearest_action(&self, from: ElementId) -> Option<(ElementId, &Action)> {
        let mut cursor = self.get(from);
        while let Some(element) = cursor {
            if let Some(action) = &element.action {
                return Some((element.id, action));
            }
            cursor = element.parent.and_then(|parent| self.get(parent));
        }
        None
    }

    /// First element whose body is a background image, with its source.
    #[must_use]
    pub fn first_background_image(&self) -> Option<(ElementId, &str)> {
        self.iter().find_map(|element| match &element.body {
            ElementBody::BackgroundImage { src } => Some((element.id, src.as_str())),
            _ => None,
        })
    }

    /// Removes an element and its whole subtree. The root cannot be removed.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == ElementId::ROOT {
            return false;
        }
        let Some(parent) = self.get(id).map(|element| element.parent) else {
            return false;
        };
        if let Some(parent) = parent.and_then(|parent| self.get_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(slot) = self.nodes.get_mut(next.0) {
                if let Some(element) = slot.take() {
                    pending.extend(element.children);
                }
            }
        }
        true
    }

    /// Sets the visual state of every element.
    pub fn set_visibility_all(&mut self, visibility: Visibility) {
        for element in self.nodes.iter_mut().flatten() {
            element.visibility = visibility;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::JumpRange;

    fn sample_tree() -> (ElementTree, ElementId, ElementId, ElementId) {
        let mut tree = ElementTree::new(
            ElementBody::Container,
            Some(Action::Jump(JumpRange::single(2))),
        );
        let panel = tree
            .add_child(
                ElementId::ROOT,
                Some("panel".into()),
                ElementBody::Container,
                Some(Action::None),
            )
            .unwrap();
        let label = tree
            .add_child(
                panel,
                Some("label".into()),
                ElementBody::Text {
                    html: "<p>hi</p>".into(),
                },
                None,
            )
            .unwrap();
        let backdrop = tree
            .add_child(
                ElementId::ROOT,
                None,
                ElementBody::BackgroundImage {
                    src: "bg.png".into(),
                },
                None,
            )
            .unwrap();
        (tree, panel, label, backdrop)
    }

    #[test]
    fn test_nearest_action_prefers_self() {
        let (tree, panel, _, _) = sample_tree();

        let (declaring, action) = tree.nearest_action(panel).unwrap();

        assert_eq!(declaring, panel);
        assert_eq!(action, &Action::None);
    }

    #[test]
    fn test_nearest_action_inherits_from_closest_ancestor() {
        let (tree, panel, label, _) = sample_tree();

        let (declaring, action) = tree.nearest_action(label).unwrap();

        assert_eq!(declaring, panel);
        assert_eq!(action, &Action::None);
    }

    #[test]
    fn test_nearest_action_falls_back_to_root() {
        let (tree, _, _, backdrop) = sample_tree();

        let (declaring, action) = tree.nearest_action(backdrop).unwrap();

        assert_eq!(declaring, ElementId::ROOT);
        assert_eq!(action, &Action::Jump(JumpRange::single(2)));
    }

    #[test]
    fn test_nearest_action_returns_none_without_declarations() {
        let mut tree = ElementTree::new(ElementBody::Container, None);
        let child = tree
            .add_child(ElementId::ROOT, None, ElementBody::Container, None)
            .unwrap();

        assert!(tree.nearest_action(child).is_none());
    }

    #[test]
    fn test_remove_detaches_whole_subtree() {
        let (mut tree, panel, label, _) = sample_tree();

        assert!(tree.remove(panel));

        assert!(!tree.contains(panel));
        assert!(!tree.contains(label));
        assert_eq!(tree.len(), 2);
        assert!(
            !tree
                .get(ElementId::ROOT)
                .unwrap()
                .children
                .contains(&panel)
        );
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let (mut tree, _, _, _) = sample_tree();

        assert!(!tree.remove(ElementId::ROOT));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_add_child_to_missing_parent_fails() {
        let (mut tree, panel, _, _) = sample_tree();
        tree.remove(panel);

        assert!(
            tree.add_child(panel, None, ElementBody::Container, None)
                .is_none()
        );
    }

    #[test]
    fn test_first_background_image_and_find_by_name() {
        let (tree, _, label, backdrop) = sample_tree();

        assert_eq!(tree.first_background_image(), Some((backdrop, "bg.png")));
        assert_eq!(tree.find_by_name("label"), Some(label));
        assert_eq!(tree.find_by_name("missing"), None);
    }

    #[test]
    fn test_set_visibility_all_touches_every_element() {
        let (mut tree, _, _, _) = sample_tree();

        tree.set_visibility_all(Visibility::Hidden);

        assert!(
            tree.iter()
                .all(|element| element.visibility == Visibility::Hidden)
        );
        assert_eq!(tree.ids().first(), Some(&ElementId::ROOT));
    }
}
