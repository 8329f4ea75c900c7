//! Click action resolution.
//!
//! Finds the action that governs a clicked element and turns it into a
//! [`Dispatch`] the engine carries out. Random jump targets are drawn here.

use kamishibai_core::action::{Action, JumpRange};
use kamishibai_core::element::{ElementId, ElementTree};
use kamishibai_core::rng::DeterministicRng;

use crate::domain::requests::NavigationRequest;

/// What a click resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Move the cursor.
    Navigate(NavigationRequest),
    /// Redirect the outer surface.
    OpenUrl(String),
    /// Run a registered effect.
    Custom {
        /// Handler name.
        handler: String,
        /// Handler parameters.
        params: serde_json::Value,
    },
    /// Nothing happens.
    Nothing,
}

/// Returns the action declared on `clicked` or its nearest declaring
/// ancestor, or [`Action::Default`] when nothing up to the root declares one.
#[must_use]
pub fn resolve_action(tree: &ElementTree, clicked: ElementId) -> Action {
    tree.nearest_action(clicked)
        .map_or(Action::Default, |(_, action)| action.clone())
}

/// Turns an action into a dispatch, drawing random targets where needed.
pub fn plan(action: &Action, rng: &mut dyn DeterministicRng) -> Dispatch {
    match action {
        Action::Jump(range) => {
            Dispatch::Navigate(NavigationRequest::Absolute(random_int(rng, *range)))
        }
        Action::JumpRelative(range) => {
            Dispatch::Navigate(NavigationRequest::Relative(random_int(rng, *range)))
        }
        Action::OpenUrl { url } => Dispatch::OpenUrl(url.clone()),
        Action::None => Dispatch::Nothing,
        Action::Custom { handler, params } => Dispatch::Custom {
            handler: handler.clone(),
            params: params.clone(),
        },
        Action::Default => Dispatch::Navigate(NavigationRequest::Next),
    }
}

/// A uniformly distributed integer in `[range.min(), range.max()]`:
/// `floor(u * (max - min + 1)) + min` for `u` drawn from `[0, 1)`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn random_int(rng: &mut dyn DeterministicRng, range: JumpRange) -> i64 {
    let span = (i128::from(range.max()) - i128::from(range.min()) + 1) as f64;
    let offset = (rng.next_f64() * span).floor() as i128;
    let value = i128::from(range.min()) + offset;
    // Guard against rounding at the top of very wide ranges.
    i64::try_from(value.min(i128::from(range.max()))).unwrap_or(range.max())
}
