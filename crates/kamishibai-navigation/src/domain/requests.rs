//! Navigation requests.

use serde::{Deserialize, Serialize};

use crate::domain::cursor::NavigationCursor;

/// A request to move the navigation cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", content = "value", rename_all = "snake_case")]
pub enum NavigationRequest {
    /// The first scene.
    First,
    /// One scene forward.
    Next,
    /// One scene back.
    Previous,
    /// An absolute index, clamped.
    Absolute(i64),
    /// An offset from the current scene, clamped.
    Relative(i64),
}

impl NavigationRequest {
    /// Applies the request to `cursor` and returns the new index.
    pub fn apply(self, cursor: &mut NavigationCursor) -> usize {
        match self {
            Self::First => cursor.go_first(),
            Self::Next => cursor.go_relative(1),
            Self::Previous => cursor.go_relative(-1),
            Self::Absolute(target) => cursor.go_to(target),
            Self::Relative(delta) => cursor.go_relative(delta),
        }
    }
}
