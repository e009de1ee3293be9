//! Episode state and core simulation types

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacle::Obstacle;
use crate::config::GameConfig;
use crate::error::EnvError;

/// Discrete action for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Noop,
    /// Start a jump; ignored while airborne
    Jump,
}

impl Action {
    /// Number of discrete actions
    pub const COUNT: usize = 2;

    pub fn index(self) -> i64 {
        match self {
            Action::Noop => 0,
            Action::Jump => 1,
        }
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Noop),
            1 => Ok(Action::Jump),
            other => Err(EnvError::InvalidAction(other)),
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dino {
    /// Top edge (screen y grows downward)
    pub y: f32,
    /// Vertical velocity in pixels/tick (negative is up)
    pub velocity: f32,
    pub jumping: bool,
}

impl Dino {
    /// Standing on the ground, at rest
    pub fn grounded(config: &GameConfig) -> Self {
        Self {
            y: config.dino_floor(),
            velocity: 0.0,
            jumping: false,
        }
    }

    /// Begin a jump if on the ground. Returns whether a jump started.
    pub fn try_jump(&mut self, config: &GameConfig) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.velocity = config.jump_impulse;
        true
    }

    /// Integrate one airborne tick; lands on floor contact
    pub fn apply_gravity(&mut self, config: &GameConfig) {
        if !self.jumping {
            return;
        }
        self.y += self.velocity;
        self.velocity += config.gravity;

        let floor = config.dino_floor();
        if self.y >= floor {
            self.y = floor;
            self.velocity = 0.0;
            self.jumping = false;
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(config.dino_x, self.y, config.dino_width, config.dino_height)
    }
}

/// Observation vector: `[dino_y, first_obstacle_x, first_obstacle_speed, score]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation(pub [f32; 4]);

impl Observation {
    pub const LEN: usize = 4;

    pub fn dino_y(&self) -> f32 {
        self.0[0]
    }

    pub fn obstacle_x(&self) -> f32 {
        self.0[1]
    }

    pub fn obstacle_speed(&self) -> f32 {
        self.0[2]
    }

    pub fn score(&self) -> f32 {
        self.0[3]
    }

    pub fn as_array(&self) -> &[f32; 4] {
        &self.0
    }
}

impl From<Observation> for [f32; 4] {
    fn from(obs: Observation) -> Self {
        obs.0
    }
}

/// Everything that lives for exactly one episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeState {
    pub dino: Dino,
    /// Fixed order; the first one is reported in the observation
    pub obstacles: Vec<Obstacle>,
    /// Accumulated survival score
    pub score: f64,
    /// Ticks simulated since reset
    pub ticks: u64,
    /// Set on the first collision
    pub terminated: bool,
}

impl EpisodeState {
    /// Fresh episode with the given obstacles
    pub fn new(config: &GameConfig, obstacles: Vec<Obstacle>) -> Self {
        Self {
            dino: Dino::grounded(config),
            obstacles,
            score: 0.0,
            ticks: 0,
            terminated: false,
        }
    }

    pub fn observation(&self) -> Observation {
        let (x, speed) = self
            .obstacles
            .first()
            .map(|o| (o.pos.x, o.speed))
            .unwrap_or((0.0, 0.0));
        Observation([self.dino.y, x, speed, self.score as f32])
    }

    /// Whether the dino overlaps any obstacle
    pub fn dino_collides(&self, config: &GameConfig) -> bool {
        let dino = self.dino.rect(config);
        self.obstacles.iter().any(|o| dino.overlaps(&o.rect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_raw() {
        assert_eq!(Action::try_from(0i64).unwrap(), Action::Noop);
        assert_eq!(Action::try_from(1i64).unwrap(), Action::Jump);
        assert!(matches!(
            Action::try_from(2i64),
            Err(EnvError::InvalidAction(2))
        ));
        assert!(matches!(
            Action::try_from(-1i64),
            Err(EnvError::InvalidAction(-1))
        ));
        assert_eq!(Action::Jump.index(), 1);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let config = GameConfig::default();
        let mut dino = Dino::grounded(&config);
        assert!(dino.try_jump(&config));
        dino.apply_gravity(&config);
        let velocity = dino.velocity;
        assert!(!dino.try_jump(&config));
        assert_eq!(dino.velocity, velocity);
    }

    #[test]
    fn test_grounded_dino_ignores_gravity() {
        let config = GameConfig::default();
        let mut dino = Dino::grounded(&config);
        dino.apply_gravity(&config);
        assert_eq!(dino.y, 260.0);
        assert_eq!(dino.velocity, 0.0);
    }

    #[test]
    fn test_jump_arc_peak_and_landing() {
        let config = GameConfig::default();
        let floor = config.dino_floor();
        let mut dino = Dino::grounded(&config);
        dino.try_jump(&config);

        let mut peak = floor;
        let mut landed_at = None;
        for tick in 1..=40 {
            dino.apply_gravity(&config);
            peak = peak.min(dino.y);
            assert!(dino.y <= floor);
            if !dino.jumping {
                landed_at = Some(tick);
                break;
            }
        }

        // Sum of 15 + 14 + ... + 1
        assert_eq!(floor - peak, 120.0);
        // Velocity sequence -15..=15 integrates back to zero after 31 ticks
        assert_eq!(landed_at, Some(31));
        assert_eq!(dino.y, floor);
        assert_eq!(dino.velocity, 0.0);
    }
}
