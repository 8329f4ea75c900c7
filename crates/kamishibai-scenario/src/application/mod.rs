//! Application layer for the scene store.

pub mod loader;
pub mod sources;
