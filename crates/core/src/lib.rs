//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game session controller: the level layout, the
//! session state machine, and the per-frame decision function. It has **zero
//! dependencies** on terminal I/O or on any particular physics backend:
//!
//! - **Deterministic**: The same inputs and contacts always yield the same commands
//! - **Testable**: Collaborators are traits, so tests drive the controller with fakes
//! - **Portable**: Any host that provides a [`PhysicsWorld`], an [`InputSource`]
//!   and a [`MessageSurface`] can run the game
//!
//! # Module Structure
//!
//! - [`level`]: static level geometry (ground, obstacle rows, spawn, bounds)
//! - [`session`]: explicit [`Mode`] state machine and the owned [`SessionState`]
//! - [`controller`]: collaborator contracts and the [`GameController`]
//! - [`snapshot`]: reusable render view of a running session
//!
//! # Frame Order
//!
//! The host calls [`GameController::initialize`] once, then
//! [`GameController::frame`] every tick. A frame runs:
//!
//! 1. a pending restart, if one was requested
//! 2. the physics step, which reports contacts through [`SessionObserver`]
//! 3. [`GameController::advance`], which decides this frame's commands
//! 4. [`GameController::apply`], which sends them to the world and surface
//!
//! # Example
//!
//! ```
//! use tui_flappy_core::{GameController, InputFrame, LevelLayout, Mode};
//! use tui_flappy_types::{Vec2, ASCEND_VELOCITY_Y};
//!
//! let mut controller = GameController::new(LevelLayout::standard());
//!
//! // Before the start the actor hovers.
//! let cmds = controller.advance(&InputFrame::default(), Vec2::new(32.0, 48.0));
//! assert_eq!(cmds.velocity_x, 0.0);
//! assert_eq!(cmds.velocity_y, Some(ASCEND_VELOCITY_Y));
//!
//! // Space starts the round.
//! let start = InputFrame { start: true, ..InputFrame::default() };
//! controller.advance(&start, Vec2::new(32.0, 48.0));
//! assert_eq!(controller.session().mode(), Mode::Running);
//! ```

pub mod controller;
pub mod level;
pub mod session;
pub mod snapshot;

pub use tui_flappy_types as types;

// Re-export commonly used types for convenience
pub use controller::{
    FrameCommands, GameController, InputFrame, InputSource, MessageSurface, PhysicsWorld,
    SessionObserver,
};
pub use level::{BodyKind, LevelLayout, StaticBody};
pub use session::{Impact, Mode, SessionState};
pub use snapshot::GameSnapshot;
