//! Application layer for scene navigation.

pub mod effects;
pub mod engine;
pub mod orchestrator;
pub mod resolver;
