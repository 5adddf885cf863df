//! Static level geometry.
//!
//! Bodies are described by their centre and size, the way sprites are placed,
//! and converted to boxes once when the layout is built.

use arrayvec::ArrayVec;

use crate::types::{
    Rect, Vec2, ACTOR_FRAME, ACTOR_SPAWN, BOTTOM_OBSTACLE_ORIGIN, GROUND_CENTER, GROUND_SCALE,
    GROUND_TEXTURE, MAX_STATIC_BODIES, OBSTACLES_PER_ROW, OBSTACLE_STEP_X, OBSTACLE_TEXTURE,
    TOP_OBSTACLE_ORIGIN, WORLD_HEIGHT, WORLD_WIDTH,
};

/// What a static body means to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Ground,
    Obstacle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBody {
    pub kind: BodyKind,
    pub rect: Rect,
}

/// Everything the physics world needs to (re)build the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    /// World bounds; the actor collides with them.
    pub bounds: Rect,
    /// Actor body centre at spawn.
    pub spawn: Vec2,
    pub actor_size: Vec2,
    bodies: ArrayVec<StaticBody, MAX_STATIC_BODIES>,
}

impl LevelLayout {
    /// An empty level: world bounds and spawn only.
    pub fn empty(bounds: Rect, spawn: Vec2, actor_size: Vec2) -> Self {
        Self {
            bounds,
            spawn,
            actor_size,
            bodies: ArrayVec::new(),
        }
    }

    /// The single-screen level: one scaled ground strip and two obstacle rows.
    pub fn standard() -> Self {
        let mut layout = Self::empty(
            Rect::new(Vec2::ZERO, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
            ACTOR_SPAWN,
            ACTOR_FRAME,
        );
        layout.push_ground(GROUND_CENTER, GROUND_TEXTURE.scale(GROUND_SCALE));
        layout.push_obstacle_row(TOP_OBSTACLE_ORIGIN, OBSTACLES_PER_ROW, OBSTACLE_STEP_X);
        layout.push_obstacle_row(BOTTOM_OBSTACLE_ORIGIN, OBSTACLES_PER_ROW, OBSTACLE_STEP_X);
        layout
    }

    /// Add a ground body. Returns `false` when the level is full.
    pub fn push_ground(&mut self, center: Vec2, size: Vec2) -> bool {
        self.push(BodyKind::Ground, Rect::from_center(center, size))
    }

    /// Add `count` obstacles starting at `first`, each `step_x` further right.
    ///
    /// Returns the number of bodies actually added.
    pub fn push_obstacle_row(&mut self, first: Vec2, count: usize, step_x: f32) -> usize {
        let mut added = 0;
        for i in 0..count {
            let center = Vec2::new(first.x + step_x * i as f32, first.y);
            if !self.push(BodyKind::Obstacle, Rect::from_center(center, OBSTACLE_TEXTURE)) {
                break;
            }
            added += 1;
        }
        added
    }

    fn push(&mut self, kind: BodyKind, rect: Rect) -> bool {
        self.bodies.try_push(StaticBody { kind, rect }).is_ok()
    }

    pub fn bodies(&self) -> &[StaticBody] {
        &self.bodies
    }

    pub fn ground(&self) -> Option<Rect> {
        self.bodies
            .iter()
            .find(|b| b.kind == BodyKind::Ground)
            .map(|b| b.rect)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = Rect> + '_ {
        self.bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Obstacle)
            .map(|b| b.rect)
    }

    /// Actor box at the spawn point, before any bounds clamping.
    pub fn spawn_rect(&self) -> Rect {
        Rect::from_center(self.spawn, self.actor_size)
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::standard()
    }
}
