//! Dino Env - a side-scrolling obstacle dodger as a reinforcement learning environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump arc, obstacle kinematics, collisions)
//! - `env`: Gymnasium-style environment contract and action/observation spaces
//! - `render`: Headless software rasterizer and frame recorder
//! - `rollout`: Policies, callbacks and the episode/replay driver
//! - `config`: Data-driven game constants
//! - `leaderboard`: Best episodes

pub mod config;
pub mod env;
pub mod error;
pub mod leaderboard;
pub mod render;
pub mod rollout;
pub mod sim;

pub use config::{GameConfig, IntRange, SpawnKind, SpawnSlot};
pub use env::{BoxSpace, Discrete, Env, Info, Step};
pub use error::{EnvError, Result};
pub use leaderboard::Leaderboard;
pub use sim::{Action, DinoGame, Observation};

/// Game configuration constants (defaults of [`GameConfig`])
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;
    /// Y coordinate of the ground line (screen y grows downward)
    pub const GROUND_HEIGHT: f32 = 300.0;

    /// Dino hitbox
    pub const DINO_X: f32 = 50.0;
    pub const DINO_WIDTH: f32 = 40.0;
    pub const DINO_HEIGHT: f32 = 40.0;

    /// Obstacle size (all obstacles share it)
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Upward velocity applied on the tick a jump starts (pixels/tick)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 1.0;

    /// Score gained per survived tick
    pub const SCORE_PER_TICK: f64 = 0.1;
    /// Reward for a tick without collision
    pub const SURVIVE_REWARD: f32 = 1.0;
    /// Reward on the tick a collision is detected
    pub const COLLISION_REWARD: f32 = -100.0;
}
