//! Domain layer for scene navigation.

pub mod cursor;
pub mod events;
pub mod requests;
