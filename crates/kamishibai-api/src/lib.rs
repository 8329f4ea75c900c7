//! Kamishibai player: the presentation engine behind an HTTP surface.
//!
//! Exposes the router pieces, application state, configuration and the
//! headless collaborators used by the `kamishibai-api` binary.

pub mod config;
pub mod effects;
pub mod error;
pub mod headless;
pub mod routes;
pub mod state;
