//! Custom effects registered by the player.

use kamishibai_navigation::application::effects::{
    EffectContext, EffectError, EffectOutcome, EffectRegistry,
};
use kamishibai_navigation::domain::requests::NavigationRequest;
use tracing::info;

/// Handler name of the logging effect.
pub const LOG_EFFECT: &str = "log";
/// Handler name of the restart effect.
pub const RESTART_EFFECT: &str = "restart";

/// The effects every player offers to scenario authors.
#[must_use]
pub fn builtin() -> EffectRegistry {
    let mut registry = EffectRegistry::new();
    registry.register_fn(LOG_EFFECT, log);
    registry.register_fn(RESTART_EFFECT, |_| {
        Ok(EffectOutcome::Navigate(NavigationRequest::First))
    });
    registry
}

/// Writes `params.message` to the log and stays on the scene.
fn log(context: &EffectContext<'_>) -> Result<EffectOutcome, EffectError> {
    let message = context
        .params
        .get("message")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| EffectError("log effect needs a string `message` parameter".into()))?;
    info!(scene = context.current_scene, %message, "scenario log");
    Ok(EffectOutcome::Stay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kamishibai_core::error::EngineError;
    use serde_json::json;

    fn run(name: &str, params: &serde_json::Value) -> Result<EffectOutcome, EngineError> {
        builtin().run(
            name,
            &EffectContext {
                current_scene: 2,
                scene_count: 3,
                params,
            },
        )
    }

    #[test]
    fn test_restart_navigates_to_first_scene() {
        let outcome = run(RESTART_EFFECT, &serde_json::Value::Null).unwrap();

        assert_eq!(outcome, EffectOutcome::Navigate(NavigationRequest::First));
    }

    #[test]
    fn test_log_stays_on_scene() {
        let outcome = run(LOG_EFFECT, &json!({ "message": "door opened" })).unwrap();

        assert_eq!(outcome, EffectOutcome::Stay);
    }

    #[test]
    fn test_log_without_message_fails() {
        let result = run(LOG_EFFECT, &json!({ "text": "wrong key" }));

        assert!(matches!(result, Err(EngineError::Effect { handler, .. }) if handler == "log"));
    }
}
