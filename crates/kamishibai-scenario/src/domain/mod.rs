//! Domain layer for the scene store.

pub mod document;
