//! Terminal input module.
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`] and provides a DAS/ARR input handler suitable
//! for terminals, including those without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{action_for_code, handle_key_event, should_quit};
