//! Arcade physics host.
//!
//! Single-screen arcade physics: one dynamic box under gravity that bounces
//! off the world bounds, plus static boxes that report overlaps and push the
//! actor out.
//!
//! The session controller only talks to it through
//! [`PhysicsWorld`](tui_flappy_core::PhysicsWorld), so any other backend can
//! be swapped in.

pub mod world;

pub use tui_flappy_core as core;
pub use tui_flappy_types as types;

pub use world::{ArcadeConfig, ArcadeWorld};
