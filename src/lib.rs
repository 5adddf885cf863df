//! TUI Flappy (workspace facade crate).
//!
//! This package exposes `tui_flappy::{core,engine,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`, plus the
//! environment-driven [`config`] used by the binary.

pub mod config;

pub use tui_flappy_core as core;
pub use tui_flappy_engine as engine;
pub use tui_flappy_input as input;
pub use tui_flappy_term as term;
pub use tui_flappy_types as types;
