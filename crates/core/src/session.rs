//! Session state machine.
//!
//! The game has four modes. Ground and obstacle contacts are sticky facts
//! that are folded into the mode instead of living in free-standing flags;
//! only `Running` carries none, since its first contact crashes it:
//!
//! ```text
//! NotStarted(impact) --start--> Running --contact--> Crashed(impact)
//!        |                         |                        ^
//!        |                         +--x > 750--> Won(impact) |
//!        +----------- start with a prior contact ------------+
//!
//! any mode --restart--> NotStarted(NONE)
//! ```

use crate::types::Message;

/// Sticky contact facts. Cleared only by a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Impact {
    /// The actor touched the ground.
    pub landed: bool,
    /// The actor touched an obstacle.
    pub bumped: bool,
}

impl Impact {
    pub const NONE: Impact = Impact {
        landed: false,
        bumped: false,
    };

    pub const LANDED: Impact = Impact {
        landed: true,
        bumped: false,
    };

    pub const BUMPED: Impact = Impact {
        landed: false,
        bumped: true,
    };

    pub fn any(&self) -> bool {
        self.landed || self.bumped
    }

    pub fn merge(self, other: Impact) -> Impact {
        Impact {
            landed: self.landed || other.landed,
            bumped: self.bumped || other.bumped,
        }
    }
}

/// Effective game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Waiting for the start input; the actor hovers at spawn whatever it
    /// has touched.
    NotStarted(Impact),
    /// Flying with no contact so far.
    Running,
    /// Touched the ground or an obstacle after the start; only a restart
    /// leaves this mode.
    Crashed(Impact),
    /// Flew past the win threshold. Contacts after the win are still
    /// recorded and stop horizontal motion.
    Won(Impact),
}

impl Mode {
    /// Fresh session: not started, nothing touched.
    pub const READY: Mode = Mode::NotStarted(Impact::NONE);

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::NotStarted(_) => "ready",
            Mode::Running => "flying",
            Mode::Crashed(_) => "crashed",
            Mode::Won(_) => "won",
        }
    }

    /// Contacts recorded so far in this episode.
    pub fn impact(&self) -> Impact {
        match *self {
            Mode::NotStarted(impact) | Mode::Crashed(impact) | Mode::Won(impact) => impact,
            Mode::Running => Impact::NONE,
        }
    }

    /// Modes whose rendering cannot change without input.
    pub fn is_static(&self) -> bool {
        match self {
            Mode::Crashed(_) => true,
            Mode::Won(impact) => impact.landed,
            _ => false,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::READY
    }
}

/// Game-progress data owned by the controller.
///
/// One instance lives for the whole process; restarts re-initialize it in
/// place via [`SessionState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    mode: Mode,
    message: Message,
    /// Incremented on every restart.
    episode_id: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            mode: Mode::READY,
            message: Message::StartPrompt,
            episode_id: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn message(&self) -> Message {
        self.message
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn is_game_started(&self) -> bool {
        !matches!(self.mode, Mode::NotStarted(_))
    }

    pub fn has_landed(&self) -> bool {
        self.mode.impact().landed
    }

    pub fn has_bumped(&self) -> bool {
        self.mode.impact().bumped
    }

    /// Set the displayed message. Returns `true` if it changed.
    pub fn set_message(&mut self, message: Message) -> bool {
        if self.message == message {
            return false;
        }
        self.message = message;
        true
    }

    /// Leave `NotStarted`. Returns `true` on the transition; later start
    /// inputs are no-ops.
    ///
    /// A session that already touched something goes straight to
    /// `Crashed`.
    pub fn start(&mut self) -> bool {
        let Mode::NotStarted(impact) = self.mode else {
            return false;
        };
        if impact.any() {
            self.mode = Mode::Crashed(impact);
            log::info!(
                "episode {}: started after contact ({:?})",
                self.episode_id,
                impact
            );
        } else {
            self.mode = Mode::Running;
            log::info!("episode {}: round started", self.episode_id);
        }
        true
    }

    /// Record a contact in any mode. Returns `true` if the mode changed.
    pub fn record_impact(&mut self, impact: Impact) -> bool {
        let next = match self.mode {
            Mode::NotStarted(prev) => Mode::NotStarted(prev.merge(impact)),
            Mode::Running => Mode::Crashed(impact),
            Mode::Crashed(prev) => Mode::Crashed(prev.merge(impact)),
            Mode::Won(prev) => Mode::Won(prev.merge(impact)),
        };
        if next == self.mode {
            return false;
        }
        if self.mode == Mode::Running {
            log::info!("episode {}: crashed ({:?})", self.episode_id, impact);
        }
        self.mode = next;
        true
    }

    /// `Running -> Won`. Returns `true` on the transition.
    pub fn win(&mut self) -> bool {
        if self.mode != Mode::Running {
            return false;
        }
        self.mode = Mode::Won(Impact::NONE);
        log::info!("episode {}: won", self.episode_id);
        true
    }

    /// Back to a fresh `NotStarted` with the start prompt, whatever the
    /// current mode.
    pub fn reset(&mut self) {
        self.mode = Mode::READY;
        self.message = Message::StartPrompt;
        self.episode_id = self.episode_id.wrapping_add(1);
        log::info!("episode {}: reset", self.episode_id);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_not_started_with_start_prompt() {
        let s = SessionState::new();
        assert_eq!(s.mode(), Mode::READY);
        assert_eq!(s.message(), Message::StartPrompt);
        assert!(!s.is_game_started());
        assert!(!s.has_landed());
        assert!(!s.has_bumped());
    }

    #[test]
    fn start_happens_once() {
        let mut s = SessionState::new();
        assert!(s.start());
        assert!(!s.start());
        assert_eq!(s.mode(), Mode::Running);
    }

    #[test]
    fn contacts_before_start_are_sticky() {
        let mut s = SessionState::new();
        assert!(s.record_impact(Impact::LANDED));
        assert_eq!(s.mode(), Mode::NotStarted(Impact::LANDED));
        assert!(!s.is_game_started());
        assert!(s.has_landed());
        assert!(!s.has_bumped());

        assert!(s.record_impact(Impact::BUMPED));
        assert!(s.has_landed() && s.has_bumped());
    }

    #[test]
    fn start_after_contact_crashes() {
        let mut s = SessionState::new();
        s.record_impact(Impact::BUMPED);
        assert!(s.start());
        assert_eq!(s.mode(), Mode::Crashed(Impact::BUMPED));
        assert!(s.is_game_started());
        assert!(!s.start());
    }

    #[test]
    fn crash_facts_accumulate() {
        let mut s = SessionState::new();
        s.start();
        assert!(s.record_impact(Impact::BUMPED));
        assert!(s.has_bumped());
        assert!(!s.has_landed());

        assert!(s.record_impact(Impact::LANDED));
        assert!(s.has_bumped());
        assert!(s.has_landed());

        // Repeated contact changes nothing.
        assert!(!s.record_impact(Impact::LANDED));
    }

    #[test]
    fn win_only_from_running() {
        let mut s = SessionState::new();
        assert!(!s.win());

        s.start();
        s.record_impact(Impact::BUMPED);
        assert!(!s.win());
        assert!(matches!(s.mode(), Mode::Crashed(_)));
    }

    #[test]
    fn contacts_after_win_are_recorded() {
        let mut s = SessionState::new();
        s.start();
        assert!(s.win());
        assert!(!s.mode().is_static());

        assert!(s.record_impact(Impact::BUMPED));
        assert_eq!(s.mode(), Mode::Won(Impact::BUMPED));
        assert!(s.has_bumped());
        assert!(!s.mode().is_static());

        assert!(s.record_impact(Impact::LANDED));
        assert_eq!(
            s.mode(),
            Mode::Won(Impact {
                landed: true,
                bumped: true
            })
        );
        assert!(s.has_landed());
        assert!(s.mode().is_static());
    }

    #[test]
    fn reset_reinitializes_in_place() {
        let mut s = SessionState::new();
        s.start();
        s.record_impact(Impact::LANDED);
        s.set_message(Message::Crashed);

        s.reset();
        assert_eq!(s.mode(), Mode::READY);
        assert_eq!(s.message(), Message::StartPrompt);
        assert_eq!(s.episode_id(), 1);
        assert!(!s.has_landed());
    }

    #[test]
    fn set_message_reports_changes_only() {
        let mut s = SessionState::new();
        assert!(!s.set_message(Message::StartPrompt));
        assert!(s.set_message(Message::Won));
        assert!(!s.set_message(Message::Won));
    }
}
