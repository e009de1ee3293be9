//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per step
//! - Injected, seedable RNG only
//! - Stable obstacle order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use engine::DinoGame;
pub use obstacle::{Obstacle, ObstacleKind};
pub use state::{Action, Dino, EpisodeState, Observation};
pub use tick::{TickOutcome, tick};
