use arrayvec::ArrayVec;

use crate::session::Mode;
use crate::types::{Rect, MAX_STATIC_BODIES};

/// Render view of a session: the mode plus every body's box.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub mode: Mode,
    pub episode_id: u32,
    pub world: Rect,
    pub actor: Rect,
    pub ground: Option<Rect>,
    pub obstacles: ArrayVec<Rect, MAX_STATIC_BODIES>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.mode = Mode::READY;
        self.episode_id = 0;
        self.world = Rect::default();
        self.actor = Rect::default();
        self.ground = None;
        self.obstacles.clear();
    }

    /// Cheap fingerprint for render throttling (FNV-1a over the mode and
    /// the actor box).
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        let mut mix = |v: u32| {
            for b in v.to_le_bytes() {
                h ^= b as u64;
                h = h.wrapping_mul(0x00000100000001B3);
            }
        };
        let kind = match self.mode {
            Mode::NotStarted(_) => 0,
            Mode::Running => 1,
            Mode::Crashed(_) => 2,
            Mode::Won(_) => 3,
        };
        let impact = self.mode.impact();
        let mode_tag = kind | (impact.landed as u32) << 4 | (impact.bumped as u32) << 5;
        mix(mode_tag);
        mix(self.episode_id);
        mix(self.actor.min.x.to_bits());
        mix(self.actor.min.y.to_bits());
        h
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            mode: Mode::READY,
            episode_id: 0,
            world: Rect::default(),
            actor: Rect::default(),
            ground: None,
            obstacles: ArrayVec::new(),
        }
    }
}
