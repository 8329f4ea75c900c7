//! Action declarations attached to scene elements.

use serde::Serialize;

use crate::error::EngineError;

/// An inclusive integer range used by the random jump actions.
///
/// Construction guarantees `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JumpRange {
    min: i64,
    max: i64,
}

impl JumpRange {
    /// Creates a range covering `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidScenario` if `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self, EngineError> {
        if min > max {
            return Err(EngineError::InvalidScenario(format!(
                "jump range minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// A range holding exactly one value.
    #[must_use]
    pub fn single(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }
}

/// What clicking an element does.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Action {
    /// Jump to a random absolute scene index within the range.
    Jump(JumpRange),
    /// Jump by a random offset within the range.
    JumpRelative(JumpRange),
    /// Leave the presentation for an external location.
    OpenUrl {
        /// Target location.
        url: String,
    },
    /// Do nothing.
    None,
    /// Run a registered effect handler.
    Custom {
        /// Registered handler name.
        handler: String,
        /// Structured parameters passed to the handler.
        params: serde_json::Value,
    },
    /// Advance to the next scene.
    Default,
}

impl Action {
    /// Returns the document-level kind name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Jump(_) => "jump",
            Self::JumpRelative(_) => "jump-relative",
            Self::OpenUrl { .. } => "open-url",
            Self::None => "none",
            Self::Custom { .. } => "custom",
            Self::Default => "default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_range_rejects_inverted_bounds() {
        let result = JumpRange::new(3, 1);

        match result {
            Err(EngineError::InvalidScenario(msg)) => {
                assert_eq!(msg, "jump range minimum 3 exceeds maximum 1");
            }
            other => panic!("expected InvalidScenario, got {other:?}"),
        }
    }

    #[test]
    fn test_jump_range_accepts_equal_and_negative_bounds() {
        let single = JumpRange::new(2, 2).unwrap();
        let backwards = JumpRange::new(-3, -1).unwrap();

        assert_eq!((single.min(), single.max()), (2, 2));
        assert_eq!((backwards.min(), backwards.max()), (-3, -1));
        assert_eq!(JumpRange::single(2), single);
    }

    #[test]
    fn test_action_kind_names() {
        assert_eq!(Action::Jump(JumpRange::single(0)).kind(), "jump");
        assert_eq!(
            Action::JumpRelative(JumpRange::single(1)).kind(),
            "jump-relative"
        );
        assert_eq!(
            Action::OpenUrl {
                url: "https://example.org".into()
            }
            .kind(),
            "open-url"
        );
        assert_eq!(Action::None.kind(), "none");
        assert_eq!(Action::Default.kind(), "default");
    }
}
