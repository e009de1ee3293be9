//! Fixed-step simulation tick
//!
//! One call advances an episode by exactly one tick. Order matters and is
//! part of the environment contract:
//! jump request, dino integration, obstacle motion, score, collision, reward.

use rand::Rng;

use super::state::{Action, EpisodeState};
use crate::config::GameConfig;

/// What a single tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub reward: f32,
    /// A collision happened on this tick
    pub collided: bool,
}

/// Advance the episode by one tick
pub fn tick<R: Rng + ?Sized>(
    state: &mut EpisodeState,
    action: Action,
    config: &GameConfig,
    rng: &mut R,
) -> TickOutcome {
    if action == Action::Jump {
        state.dino.try_jump(config);
    }
    state.dino.apply_gravity(config);

    for obstacle in &mut state.obstacles {
        obstacle.advance(config, rng);
    }

    state.score += config.score_per_tick;
    state.ticks += 1;

    let collided = state.dino_collides(config);
    if collided {
        state.terminated = true;
    }

    TickOutcome {
        reward: if collided {
            config.collision_reward
        } else {
            config.survive_reward
        },
        collided,
    }
}
