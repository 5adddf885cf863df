//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and tracks which
//! level-triggered signals are currently held, including on terminals that
//! never emit key-release events.

pub mod handler;
pub mod map;

pub use tui_flappy_core as core;
pub use tui_flappy_types as types;

pub use handler::{HeldKeys, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{handle_key_event, should_quit};
