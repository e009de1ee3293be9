//! The dino game as an environment
//!
//! Owns the configuration, the random source and the current episode.
//! Single-threaded: one `step` completes before the next begins.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::obstacle::Obstacle;
use super::state::{Action, EpisodeState, Observation};
use super::tick::tick;
use crate::config::GameConfig;
use crate::env::{BoxSpace, Discrete, Env, Info, Step};
use crate::error::{EnvError, Result};
use crate::render::{Frame, render};

/// Dino game environment, generic over its random source
#[derive(Debug, Clone)]
pub struct DinoGame<R = Pcg32> {
    config: GameConfig,
    rng: R,
    /// None until the first reset
    episode: Option<EpisodeState>,
    /// Episodes started since construction
    episodes: u64,
}

impl DinoGame<Pcg32> {
    /// Engine with the default PCG generator seeded from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RngCore + SeedableRng> DinoGame<R> {
    /// Engine with an injected random source
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            episode: None,
            episodes: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current episode, if `reset` has been called
    pub fn state(&self) -> Option<&EpisodeState> {
        self.episode.as_ref()
    }

    /// Mutable episode access for drivers and tests that stage scenarios
    pub fn state_mut(&mut self) -> Option<&mut EpisodeState> {
        self.episode.as_mut()
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    pub fn action_space(&self) -> Discrete {
        Discrete::new(Action::COUNT)
    }

    /// `[dino_y, obstacle_x, obstacle_speed, score]` bounds
    pub fn observation_space(&self) -> BoxSpace<4> {
        let c = &self.config;
        BoxSpace::new(
            [0.0; 4],
            [c.screen_height, c.screen_width, c.screen_width, f32::INFINITY],
        )
    }

    /// Start a new episode; previous obstacles are discarded
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        if let Some(seed) = seed {
            self.rng = R::seed_from_u64(seed);
        }

        let obstacles = self
            .config
            .spawns
            .iter()
            .map(|slot| Obstacle::spawn(slot, &self.config, &mut self.rng))
            .collect();
        let episode = EpisodeState::new(&self.config, obstacles);
        let observation = episode.observation();
        self.episode = Some(episode);
        self.episodes += 1;

        log::debug!(
            "episode {} reset (seed: {:?}), first obstacle speed {}",
            self.episodes,
            seed,
            observation.obstacle_speed()
        );
        (observation, Info::new())
    }

    /// Advance the current episode by one tick
    pub fn step(&mut self, action: Action) -> Result<Step<Observation>> {
        let episode = self.episode.as_mut().ok_or(EnvError::NotInitialized)?;
        let outcome = tick(episode, action, &self.config, &mut self.rng);

        if outcome.collided {
            log::debug!(
                "collision after {} ticks, score {:.1}",
                episode.ticks,
                episode.score
            );
        }

        Ok(Step {
            observation: episode.observation(),
            reward: outcome.reward,
            terminated: outcome.collided,
            truncated: false,
            info: Info::new(),
        })
    }

    /// Step with a raw discrete action; anything but 0 or 1 is rejected
    pub fn step_raw(&mut self, action: i64) -> Result<Step<Observation>> {
        let action = Action::try_from(action)?;
        self.step(action)
    }

    pub fn observation(&self) -> Result<Observation> {
        self.episode
            .as_ref()
            .map(EpisodeState::observation)
            .ok_or(EnvError::NotInitialized)
    }

    /// Draw the current episode into a new frame
    pub fn render(&self) -> Result<Frame> {
        let episode = self.episode.as_ref().ok_or(EnvError::NotInitialized)?;
        Ok(render(episode, &self.config))
    }
}

impl<R: RngCore + SeedableRng> Env for DinoGame<R> {
    type Obs = Observation;
    type Act = Action;

    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        DinoGame::reset(self, seed)
    }

    fn step(&mut self, action: Action) -> Result<Step<Observation>> {
        DinoGame::step(self, action)
    }

    fn render(&self) -> Result<Frame> {
        DinoGame::render(self)
    }

    fn close(&mut self) {
        self.episode = None;
    }
}
