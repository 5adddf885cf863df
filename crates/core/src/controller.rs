//! Game session controller and the contracts it expects from its host.
//!
//! The host engine supplies three collaborators:
//!
//! - a [`PhysicsWorld`] that owns the bodies and reports contacts,
//! - an [`InputSource`] polled once per frame,
//! - a [`MessageSurface`] that displays the status text.
//!
//! Contacts and restart requests flow back into the controller through
//! [`SessionObserver`], which [`GameController`] implements.

use crate::level::LevelLayout;
use crate::session::{Impact, Mode, SessionState};
use crate::snapshot::GameSnapshot;
use crate::types::{
    Message, Rect, Signal, Vec2, ASCEND_VELOCITY_Y, FLIGHT_SPEED_X, WIN_DESCENT_VELOCITY_Y,
    WIN_THRESHOLD_X,
};

/// Dynamic/static bodies, contact detection and velocity setters.
pub trait PhysicsWorld {
    /// (Re)build every body from `layout`, placing the actor at spawn at rest.
    fn build(&mut self, layout: &LevelLayout);

    /// Advance the simulation by `dt_ms`, reporting contacts to `observer`
    /// before returning.
    fn step(&mut self, dt_ms: u32, observer: &mut dyn SessionObserver);

    /// Actor body centre.
    fn actor_position(&self) -> Vec2;

    fn actor_bounds(&self) -> Rect;

    fn set_actor_velocity_x(&mut self, vx: f32);

    fn set_actor_velocity_y(&mut self, vy: f32);
}

/// Current key-down state of the level-triggered signals.
pub trait InputSource {
    fn is_down(&self, signal: Signal) -> bool;
}

/// Where the status message is shown.
pub trait MessageSurface {
    fn set_message(&mut self, text: &str);
}

/// Event interface for contacts and restart requests.
pub trait SessionObserver {
    fn on_ground_contact(&mut self);
    fn on_obstacle_contact(&mut self);
    fn on_restart_requested(&mut self);
}

/// Input sampled for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub ascend: bool,
    pub start: bool,
}

impl InputSource for InputFrame {
    fn is_down(&self, signal: Signal) -> bool {
        match signal {
            Signal::Ascend => self.ascend,
            Signal::Start => self.start,
        }
    }
}

/// Commands decided for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCommands {
    pub velocity_x: f32,
    /// `None` leaves the vertical velocity to gravity.
    pub velocity_y: Option<f32>,
    /// Set only when the displayed message changes.
    pub message: Option<Message>,
}

/// Owns the session state and turns input and contacts into commands.
#[derive(Debug, Clone)]
pub struct GameController {
    layout: LevelLayout,
    session: SessionState,
    restart_pending: bool,
}

impl GameController {
    pub fn new(layout: LevelLayout) -> Self {
        Self {
            layout,
            session: SessionState::new(),
            restart_pending: false,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    /// Build the scene and show the start prompt. Call once at launch; later
    /// rebuilds go through [`GameController::reset_game`].
    pub fn initialize<W, S>(&mut self, world: &mut W, surface: &mut S)
    where
        W: PhysicsWorld + ?Sized,
        S: MessageSurface + ?Sized,
    {
        self.session = SessionState::new();
        self.restart_pending = false;
        world.build(&self.layout);
        surface.set_message(self.session.message().text());
    }

    /// Clear the session in place and rebuild the scene.
    pub fn reset_game<W, S>(&mut self, world: &mut W, surface: &mut S)
    where
        W: PhysicsWorld + ?Sized,
        S: MessageSurface + ?Sized,
    {
        self.session.reset();
        self.restart_pending = false;
        world.build(&self.layout);
        surface.set_message(self.session.message().text());
    }

    /// Decide this frame's commands from the session, the polled input and
    /// the actor position. Start and win transitions happen here.
    pub fn advance<I>(&mut self, input: &I, actor: Vec2) -> FrameCommands
    where
        I: InputSource + ?Sized,
    {
        let ascend = input.is_down(Signal::Ascend);

        let (velocity_x, velocity_y, message) = match self.session.mode() {
            Mode::NotStarted(impact) => {
                if input.is_down(Signal::Start) && self.session.start() {
                    // Horizontal motion begins on the next frame.
                    match self.session.mode() {
                        Mode::Running => {
                            let vy = ascend.then_some(ASCEND_VELOCITY_Y);
                            (0.0, vy, Message::FlightInstructions)
                        }
                        _ => (0.0, None, Message::Crashed),
                    }
                } else if impact.any() {
                    (0.0, Some(ASCEND_VELOCITY_Y), Message::Crashed)
                } else {
                    (0.0, Some(ASCEND_VELOCITY_Y), Message::StartPrompt)
                }
            }
            Mode::Running => {
                if actor.x > WIN_THRESHOLD_X && self.session.win() {
                    (FLIGHT_SPEED_X, Some(WIN_DESCENT_VELOCITY_Y), Message::Won)
                } else {
                    let vy = ascend.then_some(ASCEND_VELOCITY_Y);
                    (FLIGHT_SPEED_X, vy, self.session.message())
                }
            }
            Mode::Crashed(_) => (0.0, None, Message::Crashed),
            Mode::Won(impact) => {
                let vx = if impact.any() { 0.0 } else { FLIGHT_SPEED_X };
                (vx, Some(WIN_DESCENT_VELOCITY_Y), Message::Won)
            }
        };

        let message = self.session.set_message(message).then_some(message);
        FrameCommands {
            velocity_x,
            velocity_y,
            message,
        }
    }

    /// Send decided commands to the world and the surface.
    pub fn apply<W, S>(&self, cmds: &FrameCommands, world: &mut W, surface: &mut S)
    where
        W: PhysicsWorld + ?Sized,
        S: MessageSurface + ?Sized,
    {
        world.set_actor_velocity_x(cmds.velocity_x);
        if let Some(vy) = cmds.velocity_y {
            world.set_actor_velocity_y(vy);
        }
        if let Some(message) = cmds.message {
            surface.set_message(message.text());
        }
    }

    /// Run one full frame: pending restart, physics step, decision, commands.
    pub fn frame<W, I, S>(
        &mut self,
        world: &mut W,
        input: &I,
        surface: &mut S,
        dt_ms: u32,
    ) -> FrameCommands
    where
        W: PhysicsWorld + ?Sized,
        I: InputSource + ?Sized,
        S: MessageSurface + ?Sized,
    {
        if self.restart_pending {
            self.reset_game(world, surface);
        }

        world.step(dt_ms, self);

        let cmds = self.advance(input, world.actor_position());
        self.apply(&cmds, world, surface);
        cmds
    }

    pub fn snapshot<W>(&self, world: &W) -> GameSnapshot
    where
        W: PhysicsWorld + ?Sized,
    {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(world, &mut snap);
        snap
    }

    /// Fill an existing snapshot (no allocation).
    pub fn snapshot_into<W>(&self, world: &W, snap: &mut GameSnapshot)
    where
        W: PhysicsWorld + ?Sized,
    {
        snap.clear();
        snap.mode = self.session.mode();
        snap.episode_id = self.session.episode_id();
        snap.world = self.layout.bounds;
        snap.actor = world.actor_bounds();
        snap.ground = self.layout.ground();
        for rect in self.layout.obstacles() {
            if snap.obstacles.try_push(rect).is_err() {
                break;
            }
        }
    }
}

impl SessionObserver for GameController {
    fn on_ground_contact(&mut self) {
        self.session.record_impact(Impact::LANDED);
    }

    fn on_obstacle_contact(&mut self) {
        self.session.record_impact(Impact::BUMPED);
    }

    fn on_restart_requested(&mut self) {
        log::debug!("restart requested in mode {}", self.session.mode().as_str());
        self.restart_pending = true;
    }
}
