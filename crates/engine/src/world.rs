use arrayvec::ArrayVec;

use crate::core::{BodyKind, LevelLayout, PhysicsWorld, SessionObserver, StaticBody};
use crate::types::{Rect, Vec2, ACTOR_BOUNCE, GRAVITY_Y, MAX_STATIC_BODIES, TICK_MS};

/// Tunables for [`ArcadeWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcadeConfig {
    /// Downward acceleration in units/s².
    pub gravity_y: f32,
    /// Restitution applied on every blocked axis.
    pub bounce: f32,
    /// Longest integration step; larger `dt` values are split.
    pub max_substep_ms: u32,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            gravity_y: GRAVITY_Y,
            bounce: ACTOR_BOUNCE,
            max_substep_ms: TICK_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DynamicBody {
    rect: Rect,
    velocity: Vec2,
}

/// Gravity, bounds and static-body separation for a single actor.
#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    config: ArcadeConfig,
    bounds: Rect,
    actor: DynamicBody,
    statics: ArrayVec<StaticBody, MAX_STATIC_BODIES>,
}

impl ArcadeWorld {
    pub fn new() -> Self {
        Self::with_config(ArcadeConfig::default())
    }

    pub fn with_config(config: ArcadeConfig) -> Self {
        Self {
            config,
            bounds: Rect::default(),
            actor: DynamicBody::default(),
            statics: ArrayVec::new(),
        }
    }

    pub fn actor_velocity(&self) -> Vec2 {
        self.actor.velocity
    }

    pub fn static_bodies(&self) -> &[StaticBody] {
        &self.statics
    }

    fn substep(&mut self, dt: f32, observer: &mut dyn SessionObserver) {
        let body = &mut self.actor;
        body.velocity.y += self.config.gravity_y * dt;
        body.rect.min.x += body.velocity.x * dt;
        body.rect.min.y += body.velocity.y * dt;

        self.clamp_to_bounds();

        for i in 0..self.statics.len() {
            let StaticBody { kind, rect } = self.statics[i];
            if !self.actor.rect.intersects(&rect) {
                continue;
            }
            match kind {
                BodyKind::Ground => observer.on_ground_contact(),
                BodyKind::Obstacle => observer.on_obstacle_contact(),
            }
            self.separate_from(rect);
        }
    }

    fn clamp_to_bounds(&mut self) {
        let bounce = self.config.bounce;
        let bounds_min = self.bounds.min;
        let bounds_max = self.bounds.max();
        let body = &mut self.actor;

        if body.rect.min.x < bounds_min.x {
            body.rect.min.x = bounds_min.x;
            if body.velocity.x < 0.0 {
                body.velocity.x = -body.velocity.x * bounce;
            }
        } else if body.rect.max().x > bounds_max.x {
            body.rect.min.x = bounds_max.x - body.rect.size.x;
            if body.velocity.x > 0.0 {
                body.velocity.x = -body.velocity.x * bounce;
            }
        }

        if body.rect.min.y < bounds_min.y {
            body.rect.min.y = bounds_min.y;
            if body.velocity.y < 0.0 {
                body.velocity.y = -body.velocity.y * bounce;
            }
        } else if body.rect.max().y > bounds_max.y {
            body.rect.min.y = bounds_max.y - body.rect.size.y;
            if body.velocity.y > 0.0 {
                body.velocity.y = -body.velocity.y * bounce;
            }
        }
    }

    /// Push the actor out of `other` along the axis of least penetration.
    fn separate_from(&mut self, other: Rect) {
        let bounce = self.config.bounce;
        let body = &mut self.actor;
        let a_max = body.rect.max();
        let b_max = other.max();

        let push_left = a_max.x - other.min.x;
        let push_right = b_max.x - body.rect.min.x;
        let push_up = a_max.y - other.min.y;
        let push_down = b_max.y - body.rect.min.y;

        let overlap_x = push_left.min(push_right);
        let overlap_y = push_up.min(push_down);

        if overlap_y <= overlap_x {
            if push_up <= push_down {
                body.rect.min.y -= push_up;
                if body.velocity.y > 0.0 {
                    body.velocity.y = -body.velocity.y * bounce;
                }
            } else {
                body.rect.min.y += push_down;
                if body.velocity.y < 0.0 {
                    body.velocity.y = -body.velocity.y * bounce;
                }
            }
        } else if push_left <= push_right {
            body.rect.min.x -= push_left;
            if body.velocity.x > 0.0 {
                body.velocity.x = -body.velocity.x * bounce;
            }
        } else {
            body.rect.min.x += push_right;
            if body.velocity.x < 0.0 {
                body.velocity.x = -body.velocity.x * bounce;
            }
        }
    }
}

impl Default for ArcadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for ArcadeWorld {
    fn build(&mut self, layout: &LevelLayout) {
        self.bounds = layout.bounds;
        self.actor = DynamicBody {
            rect: layout.spawn_rect(),
            velocity: Vec2::ZERO,
        };
        self.statics.clear();
        for body in layout.bodies() {
            if self.statics.try_push(*body).is_err() {
                log::warn!("static body limit reached, dropping {:?}", body.kind);
                break;
            }
        }
        log::debug!(
            "world built: {} static bodies, actor at {:?}",
            self.statics.len(),
            layout.spawn
        );
    }

    fn step(&mut self, dt_ms: u32, observer: &mut dyn SessionObserver) {
        let max = self.config.max_substep_ms.max(1);
        let mut remaining = dt_ms;
        while remaining > 0 {
            let ms = remaining.min(max);
            remaining -= ms;
            self.substep(ms as f32 / 1000.0, observer);
        }
    }

    fn actor_position(&self) -> Vec2 {
        self.actor.rect.center()
    }

    fn actor_bounds(&self) -> Rect {
        self.actor.rect
    }

    fn set_actor_velocity_x(&mut self, vx: f32) {
        self.actor.velocity.x = vx;
    }

    fn set_actor_velocity_y(&mut self, vy: f32) {
        self.actor.velocity.y = vy;
    }
}
