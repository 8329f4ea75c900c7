//! Kamishibai Core: shared scene model and collaborator ports.
//!
//! This crate defines the scene model every other crate works with and the
//! traits the engine calls into (rendering surface, media, scenario source).
//! It contains no infrastructure code.

pub mod action;
pub mod clock;
pub mod element;
pub mod error;
pub mod event;
pub mod instance;
pub mod ports;
pub mod rng;
pub mod scene;
pub mod source;
