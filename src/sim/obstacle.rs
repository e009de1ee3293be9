//! Obstacle kinematics
//!
//! Obstacles scroll left at their own speed and respawn in place past the
//! right edge once fully off screen. Flying obstacles also bob vertically
//! between the top of the screen and the ground line.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::{GameConfig, SpawnKind, SpawnSlot};

/// Variant-specific obstacle state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground line, moves horizontally only
    Ground,
    /// Bounces between y = 0 and the ground line
    Flying { vertical_speed: f32 },
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed in pixels/tick (always positive)
    pub speed: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn ground(x: f32, config: &GameConfig, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, config.obstacle_floor()),
            size: Vec2::new(config.obstacle_width, config.obstacle_height),
            speed,
            kind: ObstacleKind::Ground,
        }
    }

    pub fn flying(x: f32, y: f32, config: &GameConfig, speed: f32, vertical_speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(config.obstacle_width, config.obstacle_height),
            speed,
            kind: ObstacleKind::Flying { vertical_speed },
        }
    }

    /// Create the obstacle a spawn slot describes, just beyond the right edge
    pub fn spawn<R: Rng + ?Sized>(slot: &SpawnSlot, config: &GameConfig, rng: &mut R) -> Self {
        let x = config.screen_width + slot.offset;
        let speed = slot.speed.sample(rng) as f32;
        match slot.kind {
            SpawnKind::Ground => Self::ground(x, config, speed),
            SpawnKind::Flying => {
                let y = config.flying_spawn_altitude.sample(rng) as f32;
                let vertical_speed = config.flying_vertical_speed.sample(rng) as f32;
                Self::flying(x, y, config, speed, vertical_speed)
            }
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.kind, ObstacleKind::Flying { .. })
    }

    /// Bounding box for collision tests
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Advance one tick: scroll, bob (flying only), respawn once off screen
    pub fn advance<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        self.pos.x -= self.speed;

        if let ObstacleKind::Flying { vertical_speed } = &mut self.kind {
            self.pos.y += *vertical_speed;

            // Keep within [0, ground - height], always turning back inward
            let floor = config.ground_height - self.size.y;
            if self.pos.y <= 0.0 {
                self.pos.y = 0.0;
                *vertical_speed = vertical_speed.abs();
            } else if self.pos.y >= floor {
                self.pos.y = floor;
                *vertical_speed = -vertical_speed.abs();
            }
        }

        if self.pos.x + self.size.x < 0.0 {
            self.respawn(config, rng);
        }
    }

    fn respawn<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        self.pos.x = config.screen_width + config.respawn_offset.sample(rng) as f32;
        match &mut self.kind {
            ObstacleKind::Ground => {
                self.speed = config.ground_respawn_speed.sample(rng) as f32;
            }
            ObstacleKind::Flying { vertical_speed } => {
                self.speed = config.flying_respawn_speed.sample(rng) as f32;
                *vertical_speed = config.flying_vertical_speed.sample(rng) as f32;
            }
        }
        log::trace!(
            "respawned {} obstacle at x={} speed={}",
            if self.is_flying() { "flying" } else { "ground" },
            self.pos.x,
            self.speed
        );
    }
}
