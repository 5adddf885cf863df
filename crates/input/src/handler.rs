//! Held-key tracking for terminal environments.
//!
//! The session polls "is ascend down" every frame, but most terminals only
//! report presses (plus OS auto-repeat). A held key is therefore treated as
//! released once no press or repeat has been seen for a timeout. As soon as a
//! real release event arrives the terminal is known to report releases and the
//! timeout is no longer applied.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::InputFrame;
use crate::map::handle_key_event;
use crate::types::{GameAction, Signal};

/// Long enough to bridge typical OS auto-repeat gaps once repeating starts.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 200;

#[derive(Debug, Clone, Copy, Default)]
struct Hold {
    down: bool,
    last_seen_ms: u64,
}

/// Tracks which signals are held and turns them into per-frame input.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    ascend: Hold,
    start: Hold,
    key_release_timeout_ms: u32,
    release_events_seen: bool,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self {
            ascend: Hold::default(),
            start: Hold::default(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn release_events_seen(&self) -> bool {
        self.release_events_seen
    }

    fn hold_mut(&mut self, signal: Signal) -> &mut Hold {
        match signal {
            Signal::Ascend => &mut self.ascend,
            Signal::Start => &mut self.start,
        }
    }

    pub fn press(&mut self, signal: Signal, now_ms: u64) {
        let hold = self.hold_mut(signal);
        hold.down = true;
        hold.last_seen_ms = now_ms;
    }

    pub fn release(&mut self, signal: Signal) {
        self.release_events_seen = true;
        self.hold_mut(signal).down = false;
    }

    /// Feed one terminal key event.
    ///
    /// Returns the mapped action for presses, so one-shot actions such as
    /// [`GameAction::Restart`] can be dispatched by the caller. Repeats only
    /// refresh held signals; releases return `None`.
    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> Option<GameAction> {
        let action = handle_key_event(key)?;
        match key.kind {
            KeyEventKind::Press => {
                if let Some(signal) = action.signal() {
                    self.press(signal, now_ms);
                }
                Some(action)
            }
            KeyEventKind::Repeat => {
                if let Some(signal) = action.signal() {
                    self.press(signal, now_ms);
                }
                None
            }
            KeyEventKind::Release => {
                if let Some(signal) = action.signal() {
                    self.release(signal);
                }
                None
            }
        }
    }

    fn is_down(&self, hold: Hold, now_ms: u64) -> bool {
        if !hold.down {
            return false;
        }
        self.release_events_seen
            || now_ms.saturating_sub(hold.last_seen_ms) <= self.key_release_timeout_ms as u64
    }

    /// Input for the frame at `now_ms`.
    pub fn frame(&self, now_ms: u64) -> InputFrame {
        InputFrame {
            ascend: self.is_down(self.ascend, now_ms),
            start: self.is_down(self.start, now_ms),
        }
    }

    pub fn reset(&mut self) {
        self.ascend = Hold::default();
        self.start = Hold::default();
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}
