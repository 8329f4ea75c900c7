//! The navigation cursor.

use kamishibai_core::error::EngineError;

/// Index of the current scene, always within `[0, scene_count)`.
///
/// Every move is total: out-of-range targets are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    current: usize,
    scene_count: usize,
}

impl NavigationCursor {
    /// Creates a cursor at scene 0.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ScenarioNotFound` if `scene_count` is zero.
    pub fn new(scene_count: usize) -> Result<Self, EngineError> {
        if scene_count == 0 {
            return Err(EngineError::ScenarioNotFound);
        }
        Ok(Self {
            current: 0,
            scene_count,
        })
    }

    /// Current scene index.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of scenes navigated over.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scene_count
    }

    /// Index of the last scene.
    #[must_use]
    pub fn last(&self) -> usize {
        self.scene_count - 1
    }

    /// `max(0, min(target, scene_count - 1))`.
    #[must_use]
    pub fn clamp(&self, target: i64) -> usize {
        let last = i64::try_from(self.last()).unwrap_or(i64::MAX);
        usize::try_from(target.clamp(0, last)).unwrap_or(0)
    }

    /// Moves to `target`, clamped, and returns the new index.
    pub fn go_to(&mut self, target: i64) -> usize {
        self.current = self.clamp(target);
        self.current
    }

    /// Moves to the first scene.
    pub fn go_first(&mut self) -> usize {
        self.go_to(0)
    }

    /// Moves by `delta` from the current scene, clamped.
    pub fn go_relative(&mut self, delta: i64) -> usize {
        let current = i64::try_from(self.current).unwrap_or(i64::MAX);
        self.go_to(current.saturating_add(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_scenario() {
        assert!(matches!(
            NavigationCursor::new(0),
            Err(EngineError::ScenarioNotFound)
        ));
    }

    #[test]
    fn test_go_to_matches_clamp_formula_for_many_targets() {
        for scene_count in 1..=6_usize {
            let mut cursor = NavigationCursor::new(scene_count).unwrap();
            let last = i64::try_from(scene_count).unwrap() - 1;
            for target in -10..=10_i64 {
                let expected = usize::try_from(target.min(last).max(0)).unwrap();

                assert_eq!(cursor.go_to(target), expected, "count {scene_count} target {target}");
                assert_eq!(cursor.current(), expected);
            }
        }
    }

    #[test]
    fn test_extreme_targets_do_not_overflow() {
        let mut cursor = NavigationCursor::new(3).unwrap();

        assert_eq!(cursor.go_to(i64::MAX), 2);
        assert_eq!(cursor.go_relative(i64::MAX), 2);
        assert_eq!(cursor.go_to(i64::MIN), 0);
        assert_eq!(cursor.go_relative(i64::MIN), 0);
    }

    #[test]
    fn test_previous_at_first_scene_stays_put() {
        let mut cursor = NavigationCursor::new(3).unwrap();

        for _ in 0..5 {
            assert_eq!(cursor.go_relative(-1), 0);
        }
    }

    #[test]
    fn test_next_at_last_scene_stays_put() {
        let mut cursor = NavigationCursor::new(3).unwrap();
        cursor.go_to(2);

        for _ in 0..5 {
            assert_eq!(cursor.go_relative(1), 2);
        }
    }

    #[test]
    fn test_walkthrough_of_three_scenes() {
        // Arrange
        let mut cursor = NavigationCursor::new(3).unwrap();

        // Act / Assert
        assert_eq!(cursor.current(), 0);
        assert_eq!(cursor.go_relative(1), 1);
        assert_eq!(cursor.go_relative(1), 2);
        assert_eq!(cursor.go_relative(1), 2);
        assert_eq!(cursor.go_first(), 0);
    }

    #[test]
    fn test_single_scene_cursor_never_moves() {
        let mut cursor = NavigationCursor::new(1).unwrap();

        assert_eq!(cursor.go_relative(1), 0);
        assert_eq!(cursor.go_relative(-1), 0);
        assert_eq!(cursor.go_to(42), 0);
    }
}
