//! Game configuration
//!
//! Every tunable of the simulation lives here so an engine can be built with
//! explicit parameters. `GameConfig::default()` reproduces the classic game.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{EnvError, Result};

/// Inclusive integer range sampled uniformly (both ends reachable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub lo: i32,
    pub hi: i32,
}

impl IntRange {
    pub const fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    /// Draw a value in `lo..=hi`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.random_range(self.lo..=self.hi)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.lo as f32 && value <= self.hi as f32
    }

    fn check(&self, name: &str) -> Result<()> {
        if self.lo > self.hi {
            return Err(EnvError::InvalidConfig(format!(
                "{name}: lo ({}) > hi ({})",
                self.lo, self.hi
            )));
        }
        Ok(())
    }
}

/// Obstacle variant created by a spawn slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Ground,
    Flying,
}

/// Where and how one obstacle enters the episode at reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSlot {
    /// Distance beyond the right screen edge
    pub offset: f32,
    pub kind: SpawnKind,
    /// Initial horizontal speed
    pub speed: IntRange,
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Y of the ground line; bodies rest with their bottom edge on it
    pub ground_height: f32,

    // === Dino ===
    pub dino_x: f32,
    pub dino_width: f32,
    pub dino_height: f32,
    /// Velocity set when a jump starts (negative is up)
    pub jump_impulse: f32,
    /// Added to the velocity every airborne tick
    pub gravity: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Distance beyond the right edge an obstacle reappears at
    pub respawn_offset: IntRange,
    pub ground_respawn_speed: IntRange,
    /// Defaults to the ground range, not the flying spawn range (6..=12)
    pub flying_respawn_speed: IntRange,
    pub flying_vertical_speed: IntRange,
    /// Initial y of a flying obstacle
    pub flying_spawn_altitude: IntRange,
    /// Obstacles created at reset, in observation order
    pub spawns: Vec<SpawnSlot>,

    // === Scoring ===
    pub score_per_tick: f64,
    pub survive_reward: f32,
    pub collision_reward: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,

            dino_x: DINO_X,
            dino_width: DINO_WIDTH,
            dino_height: DINO_HEIGHT,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            respawn_offset: IntRange::new(50, 300),
            ground_respawn_speed: IntRange::new(5, 10),
            flying_respawn_speed: IntRange::new(5, 10),
            flying_vertical_speed: IntRange::new(-5, 5),
            flying_spawn_altitude: IntRange::new(50, 200),
            spawns: vec![
                SpawnSlot {
                    offset: 0.0,
                    kind: SpawnKind::Ground,
                    speed: IntRange::new(5, 10),
                },
                SpawnSlot {
                    offset: 300.0,
                    kind: SpawnKind::Flying,
                    speed: IntRange::new(6, 12),
                },
                SpawnSlot {
                    offset: 600.0,
                    kind: SpawnKind::Ground,
                    speed: IntRange::new(7, 14),
                },
            ],

            score_per_tick: SCORE_PER_TICK,
            survive_reward: SURVIVE_REWARD,
            collision_reward: COLLISION_REWARD,
        }
    }
}

impl GameConfig {
    /// Resting y of the dino (top edge when standing on the ground)
    #[inline]
    pub fn dino_floor(&self) -> f32 {
        self.ground_height - self.dino_height
    }

    /// Resting y of a ground obstacle, also the lowest y of a flying one
    #[inline]
    pub fn obstacle_floor(&self) -> f32 {
        self.ground_height - self.obstacle_height
    }

    /// Check the parameters describe a playable game
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("dino_width", self.dino_width),
            ("dino_height", self.dino_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(EnvError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let finite = [
            ("ground_height", self.ground_height),
            ("dino_x", self.dino_x),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("survive_reward", self.survive_reward),
            ("collision_reward", self.collision_reward),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(EnvError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if !self.score_per_tick.is_finite() || self.score_per_tick < 0.0 {
            return Err(EnvError::InvalidConfig(format!(
                "score_per_tick must be finite and non-negative, got {}",
                self.score_per_tick
            )));
        }

        // Jumps must go up and come back down
        if self.jump_impulse >= 0.0 {
            return Err(EnvError::InvalidConfig(format!(
                "jump_impulse must be negative (up), got {}",
                self.jump_impulse
            )));
        }
        if self.gravity <= 0.0 {
            return Err(EnvError::InvalidConfig(format!(
                "gravity must be positive (down), got {}",
                self.gravity
            )));
        }

        if self.ground_height > self.screen_height
            || self.ground_height < self.dino_height
            || self.ground_height < self.obstacle_height
        {
            return Err(EnvError::InvalidConfig(format!(
                "ground_height {} must fit the screen and both body heights",
                self.ground_height
            )));
        }

        self.respawn_offset.check("respawn_offset")?;
        self.ground_respawn_speed.check("ground_respawn_speed")?;
        self.flying_respawn_speed.check("flying_respawn_speed")?;
        self.flying_vertical_speed.check("flying_vertical_speed")?;
        self.flying_spawn_altitude.check("flying_spawn_altitude")?;

        if self.respawn_offset.lo < 0 {
            return Err(EnvError::InvalidConfig(
                "respawn_offset must not place obstacles on screen".into(),
            ));
        }
        if self.ground_respawn_speed.lo < 1 || self.flying_respawn_speed.lo < 1 {
            return Err(EnvError::InvalidConfig(
                "respawn speeds must be positive".into(),
            ));
        }

        if self.spawns.is_empty() {
            return Err(EnvError::InvalidConfig(
                "at least one spawn slot is required".into(),
            ));
        }
        for (i, slot) in self.spawns.iter().enumerate() {
            slot.speed.check(&format!("spawns[{i}].speed"))?;
            if slot.speed.lo < 1 {
                return Err(EnvError::InvalidConfig(format!(
                    "spawns[{i}].speed must be positive"
                )));
            }
        }

        let altitude = self.flying_spawn_altitude;
        if altitude.lo < 0 || altitude.hi as f32 > self.obstacle_floor() {
            log::warn!(
                "flying_spawn_altitude {}..={} leaves [0, {}]; obstacles snap back on their first tick",
                altitude.lo,
                altitude.hi,
                self.obstacle_floor()
            );
        }

        Ok(())
    }

    /// Load a config from a JSON file; absent fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dino_floor(), 260.0);
        assert_eq!(config.obstacle_floor(), 260.0);
        assert_eq!(config.spawns.len(), 3);
    }

    #[test]
    fn test_int_range_sample_inclusive() {
        let range = IntRange::new(5, 6);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let v = range.sample(&mut rng);
            assert!((5..=6).contains(&v));
            seen[(v - 5) as usize] = true;
        }
        assert!(seen[0] && seen[1], "both ends must be reachable");
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = GameConfig {
            ground_respawn_speed: IntRange::new(10, 5),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnvError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_physics() {
        let cases = [
            GameConfig {
                score_per_tick: -1.0,
                ..Default::default()
            },
            GameConfig {
                gravity: 0.0,
                ..Default::default()
            },
            GameConfig {
                gravity: -1.0,
                ..Default::default()
            },
            GameConfig {
                jump_impulse: 0.0,
                ..Default::default()
            },
            GameConfig {
                jump_impulse: f32::NAN,
                ..Default::default()
            },
            GameConfig {
                gravity: f32::NAN,
                ..Default::default()
            },
            GameConfig {
                dino_x: f32::NAN,
                ..Default::default()
            },
            GameConfig {
                score_per_tick: f64::NAN,
                ..Default::default()
            },
            GameConfig {
                screen_width: f32::INFINITY,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(EnvError::InvalidConfig(_))),
                "accepted {config:?}"
            );
        }

        let no_score = GameConfig {
            score_per_tick: 0.0,
            ..Default::default()
        };
        assert!(no_score.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_spawns() {
        let config = GameConfig {
            spawns: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ground_below_screen() {
        let config = GameConfig {
            ground_height: 500.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "gravity": 2.0 }"#).unwrap();
        assert_eq!(config.gravity, 2.0);
        assert_eq!(config.jump_impulse, JUMP_IMPULSE);
        assert_eq!(config.spawns, GameConfig::default().spawns);
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!("dino_env_config_{}.json", std::process::id()));
        let config = GameConfig {
            flying_respawn_speed: IntRange::new(6, 12),
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
