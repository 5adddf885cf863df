//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (session logic, physics host, terminal rendering).
//!
//! # World Geometry
//!
//! The world is measured in logical units with the origin at the top-left and
//! positive `y` pointing down:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WORLD_WIDTH` | 900 | Viewport width |
//! | `WORLD_HEIGHT` | 600 | Viewport height |
//! | `GRAVITY_Y` | 300 | Downward acceleration (units/s²) |
//! | `FLIGHT_SPEED_X` | 50 | Horizontal speed while flying |
//! | `ASCEND_VELOCITY_Y` | -160 | Vertical speed while ascending/hovering |
//! | `WIN_THRESHOLD_X` | 750 | Actor x beyond which the round is won |
//! | `WIN_DESCENT_VELOCITY_Y` | 40 | Vertical speed after winning |
//! | `ACTOR_BOUNCE` | 0.2 | Restitution on bounds and static bodies |
//!
//! # Level Layout
//!
//! - **Ground**: centred at (400, 568), texture scaled 2x
//! - **Top obstacles**: x = 200 + 300n, y = 0
//! - **Bottom obstacles**: x = 350 + 300n, y = 400
//! - **Actor spawn**: (0, 50), pulled inside the world bounds on the first step
//!
//! # Examples
//!
//! ```
//! use tui_flappy_types::{GameAction, Rect, Vec2, WORLD_WIDTH};
//!
//! let action = GameAction::from_str("start").unwrap();
//! assert_eq!(action, GameAction::Start);
//!
//! let a = Rect::from_center(Vec2::new(10.0, 10.0), Vec2::new(4.0, 4.0));
//! let b = Rect::from_center(Vec2::new(12.0, 12.0), Vec2::new(4.0, 4.0));
//! assert!(a.intersects(&b));
//!
//! assert_eq!(WORLD_WIDTH, 900.0);
//! ```

/// World width in logical units.
pub const WORLD_WIDTH: f32 = 900.0;

/// World height in logical units.
pub const WORLD_HEIGHT: f32 = 600.0;

/// Downward gravity acceleration (units per second squared).
pub const GRAVITY_Y: f32 = 300.0;

/// Horizontal velocity commanded while the actor is flying.
pub const FLIGHT_SPEED_X: f32 = 50.0;

/// Vertical velocity commanded while ascending or hovering before the start.
pub const ASCEND_VELOCITY_Y: f32 = -160.0;

/// Actor x position beyond which the round counts as won.
pub const WIN_THRESHOLD_X: f32 = 750.0;

/// Vertical velocity commanded every frame once the round is won.
pub const WIN_DESCENT_VELOCITY_Y: f32 = 40.0;

/// Restitution applied when the actor hits the world bounds or a static body.
pub const ACTOR_BOUNCE: f32 = 0.2;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Actor spawn point (body centre).
pub const ACTOR_SPAWN: Vec2 = Vec2::new(0.0, 50.0);

/// Actor body size: the spritesheet frame, unscaled.
///
/// The sprite is drawn at 2x elsewhere, but a 128x192 body barely fits the
/// 220-unit gap between the column rows, so the body keeps the frame size.
pub const ACTOR_FRAME: Vec2 = Vec2::new(64.0, 96.0);

/// Ground body centre.
pub const GROUND_CENTER: Vec2 = Vec2::new(400.0, 568.0);

/// Ground texture size before scaling.
pub const GROUND_TEXTURE: Vec2 = Vec2::new(400.0, 32.0);

/// Scale applied to the ground texture.
pub const GROUND_SCALE: f32 = 2.0;

/// Obstacle texture size.
pub const OBSTACLE_TEXTURE: Vec2 = Vec2::new(40.0, 180.0);

/// Centre of the first body in the top obstacle row.
pub const TOP_OBSTACLE_ORIGIN: Vec2 = Vec2::new(200.0, 0.0);

/// Centre of the first body in the bottom obstacle row.
pub const BOTTOM_OBSTACLE_ORIGIN: Vec2 = Vec2::new(350.0, 400.0);

/// Number of bodies in each obstacle row.
pub const OBSTACLES_PER_ROW: usize = 2;

/// Horizontal distance between consecutive bodies in a row.
pub const OBSTACLE_STEP_X: f32 = 300.0;

/// Upper bound on static bodies a level may hold (ground + both rows).
pub const MAX_STATIC_BODIES: usize = 8;


/// 2D vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

/// Axis-aligned box described by its min corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Build a box centred on `center`, the way sprites are placed.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(center.x - size.x / 2.0, center.y - size.y / 2.0),
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.min.x + self.size.x, self.min.y + self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.min.x + self.size.x / 2.0,
            self.min.y + self.size.y / 2.0,
        )
    }

    /// Strict overlap test: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let a = self.max();
        let b = other.max();
        self.min.x < b.x && other.min.x < a.x && self.min.y < b.y && other.min.y < a.y
    }

    /// Half-open containment test (`min <= p < max`).
    pub fn contains(&self, p: Vec2) -> bool {
        let m = self.max();
        p.x >= self.min.x && p.x < m.x && p.y >= self.min.y && p.y < m.y
    }
}

/// Discrete player actions produced by the input layer.
///
/// `Ascend` and `Start` are also polled as held [`Signal`]s every frame;
/// `Restart` is one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Flap upward (directional "up" key)
    Ascend,
    /// Start the round (space bar)
    Start,
    /// Rebuild the level and return to the start prompt
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_flappy_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("ascend"), Some(GameAction::Ascend));
    /// assert_eq!(GameAction::from_str("RESTART"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ascend" => Some(GameAction::Ascend),
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Ascend => "ascend",
            GameAction::Start => "start",
            GameAction::Restart => "restart",
        }
    }

    /// The level-triggered signal this action holds down, if any.
    pub fn signal(&self) -> Option<Signal> {
        match self {
            GameAction::Ascend => Some(Signal::Ascend),
            GameAction::Start => Some(Signal::Start),
            GameAction::Restart => None,
        }
    }
}

/// Level-triggered input signals polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Ascend,
    Start,
}

/// Status text shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    StartPrompt,
    FlightInstructions,
    Crashed,
    Won,
}

impl Message {
    pub fn text(&self) -> &'static str {
        match self {
            Message::StartPrompt => "Instructions: Press space bar to start",
            Message::FlightInstructions => {
                "Instructions: Press the \"^\" button to stay upright\nAnd don't hit the columns or the ground"
            }
            Message::Crashed => "Oh no! You crashed!\n Press \"r\" to play again",
            Message::Won => "Congrats! You won!",
        }
    }
}
