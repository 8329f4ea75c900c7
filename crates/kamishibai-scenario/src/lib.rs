//! Kamishibai: scene store.
//!
//! Responsible for reading presentation documents, validating them, and
//! turning them into the immutable scenario the engine navigates.

pub mod application;
pub mod domain;
