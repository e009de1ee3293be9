//! Episode and replay drivers
//!
//! A driver feeds policy actions into an [`Env`], reports every step to a
//! callback, and can capture rendered frames. Learning happens elsewhere: a
//! trained agent plugs in as a [`Policy`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::env::Env;
use crate::error::Result;
use crate::render::FrameRecorder;
use crate::sim::{Action, Observation};

/// Chooses an action from an observation
pub trait Policy {
    fn act(&mut self, obs: &Observation) -> Action;
}

/// Never jumps
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNoop;

impl Policy for AlwaysNoop {
    fn act(&mut self, _obs: &Observation) -> Action {
        Action::Noop
    }
}

/// Uniformly random actions from a seeded generator
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
    /// Probability of choosing `Jump`, always in `[0, 1]`
    jump_probability: f64,
}

impl RandomPolicy {
    pub const DEFAULT_JUMP_PROBABILITY: f64 = 0.5;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            jump_probability: Self::DEFAULT_JUMP_PROBABILITY,
        }
    }

    /// Clamped to `[0, 1]`; NaN falls back to the default
    pub fn with_jump_probability(mut self, p: f64) -> Self {
        self.jump_probability = if p.is_nan() {
            Self::DEFAULT_JUMP_PROBABILITY
        } else {
            p.clamp(0.0, 1.0)
        };
        self
    }

    pub fn jump_probability(&self) -> f64 {
        self.jump_probability
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _obs: &Observation) -> Action {
        if self.rng.random_bool(self.jump_probability) {
            Action::Jump
        } else {
            Action::Noop
        }
    }
}

/// Jumps when the tracked obstacle is closer than `trigger_distance`
///
/// Only sees the first obstacle, like any agent trained on this observation.
#[derive(Debug, Clone, Copy)]
pub struct JumpWhenClose {
    /// Left edge of the dino
    pub dino_x: f32,
    /// Horizontal gap at which to jump, in pixels
    pub trigger_distance: f32,
}

impl Default for JumpWhenClose {
    fn default() -> Self {
        Self {
            dino_x: crate::consts::DINO_X,
            trigger_distance: 80.0,
        }
    }
}

impl Policy for JumpWhenClose {
    fn act(&mut self, obs: &Observation) -> Action {
        let gap = obs.obstacle_x() - self.dino_x;
        if gap > 0.0 && gap <= self.trigger_distance {
            Action::Jump
        } else {
            Action::Noop
        }
    }
}

/// One step as seen by a callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// 1-based step index within the episode
    pub step: u64,
    pub action: Action,
    pub reward: f32,
    pub terminated: bool,
}

/// Observes the run; returning false stops it
pub trait Callback {
    fn on_step(&mut self, record: &StepRecord) -> bool;
}

/// Does nothing and never stops the run
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallback;

impl Callback for NoCallback {
    fn on_step(&mut self, _record: &StepRecord) -> bool {
        true
    }
}

/// Records the reward of every step
#[derive(Debug, Clone, Default)]
pub struct RewardLogger {
    pub rewards: Vec<f32>,
}

impl RewardLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> f64 {
        self.rewards.iter().map(|&r| r as f64).sum()
    }

    /// Number of collisions seen
    pub fn penalties(&self) -> usize {
        self.rewards.iter().filter(|&&r| r < 0.0).count()
    }
}

impl Callback for RewardLogger {
    fn on_step(&mut self, record: &StepRecord) -> bool {
        self.rewards.push(record.reward);
        true
    }
}

/// Outcome of one episode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpisodeSummary {
    pub ticks: u64,
    pub total_reward: f64,
    /// Final score reported in the last observation
    pub score: f64,
    /// Ended by collision (false when the step budget ran out)
    pub terminated: bool,
}

/// Run one episode from reset until termination, `max_steps`, or a callback
/// asks to stop. A frame is captured after every step while the recorder
/// has room.
pub fn run_episode<E, P, C>(
    env: &mut E,
    policy: &mut P,
    seed: Option<u64>,
    max_steps: u64,
    callback: &mut C,
    mut recorder: Option<&mut FrameRecorder>,
) -> Result<EpisodeSummary>
where
    E: Env<Obs = Observation, Act = Action>,
    P: Policy + ?Sized,
    C: Callback + ?Sized,
{
    let (mut obs, _) = env.reset(seed);
    let mut summary = EpisodeSummary::default();

    while summary.ticks < max_steps {
        let action = policy.act(&obs);
        let step = env.step(action)?;
        summary.ticks += 1;
        summary.total_reward += step.reward as f64;
        summary.score = step.observation.score() as f64;
        obs = step.observation;

        if let Some(recorder) = recorder.as_deref_mut() {
            if !recorder.is_full() {
                recorder.push(env.render()?);
            }
        }

        let keep_going = callback.on_step(&StepRecord {
            step: summary.ticks,
            action,
            reward: step.reward,
            terminated: step.terminated,
        });

        if step.terminated {
            summary.terminated = true;
            break;
        }
        if !keep_going {
            break;
        }
    }

    log::info!(
        "episode finished: {} ticks, reward {:.0}, score {:.1}{}",
        summary.ticks,
        summary.total_reward,
        summary.score,
        if summary.terminated { "" } else { " (step limit)" }
    );
    Ok(summary)
}

/// Run a fixed number of steps across episodes, resetting after every
/// collision and capturing a frame per step. Returns the finished episodes;
/// an unfinished trailing episode is not included.
pub fn run_replay<E, P>(
    env: &mut E,
    policy: &mut P,
    seed: Option<u64>,
    steps: u64,
    recorder: &mut FrameRecorder,
) -> Result<Vec<EpisodeSummary>>
where
    E: Env<Obs = Observation, Act = Action>,
    P: Policy + ?Sized,
{
    let (mut obs, _) = env.reset(seed);
    let mut finished = Vec::new();
    let mut current = EpisodeSummary::default();

    for _ in 0..steps {
        let action = policy.act(&obs);
        let step = env.step(action)?;
        current.ticks += 1;
        current.total_reward += step.reward as f64;
        current.score = step.observation.score() as f64;
        obs = step.observation;

        if !recorder.is_full() {
            recorder.push(env.render()?);
        }

        if step.terminated {
            current.terminated = true;
            finished.push(std::mem::take(&mut current));
            obs = env.reset(None).0;
        }
    }

    log::info!(
        "replay: {} steps, {} episodes finished, {} frames captured",
        steps,
        finished.len(),
        recorder.len()
    );
    Ok(finished)
}
