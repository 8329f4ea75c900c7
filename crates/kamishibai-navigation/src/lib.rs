//! Kamishibai: scene navigation engine.
//!
//! Responsible for the navigation cursor, scene transitions, and resolving
//! clicks on the live scene into navigation or side effects.

pub mod application;
pub mod domain;
