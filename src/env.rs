//! Environment contract and action/observation spaces
//!
//! Gymnasium-shaped: `reset` starts an episode, `step` advances it by one
//! action, `render` draws the current frame.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::Frame;

/// Auxiliary per-step information (empty for the dino game)
pub type Info = BTreeMap<String, serde_json::Value>;

/// Result of one `step`
#[derive(Debug, Clone, PartialEq)]
pub struct Step<Obs> {
    pub observation: Obs,
    pub reward: f32,
    /// Episode ended inside the environment (collision)
    pub terminated: bool,
    /// Episode cut short by a step limit
    pub truncated: bool,
    pub info: Info,
}

impl<Obs> Step<Obs> {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// A resettable, steppable environment
pub trait Env {
    type Obs;
    type Act;

    /// Start a new episode. `Some(seed)` re-seeds the environment RNG.
    fn reset(&mut self, seed: Option<u64>) -> (Self::Obs, Info);

    /// Apply an action and advance one tick
    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>>;

    /// Draw the current state
    fn render(&self) -> Result<Frame>;

    /// Release external resources
    fn close(&mut self) {}
}

/// Finite set of actions `0..n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= 0 && (value as u64) < self.n as u64
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.random_range(0..self.n) as i64
    }
}

/// Box of `N` reals bounded per component (bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpace<const N: usize> {
    pub low: [f32; N],
    pub high: [f32; N],
}

impl<const N: usize> BoxSpace<N> {
    pub fn new(low: [f32; N], high: [f32; N]) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: &[f32; N]) -> bool {
        value
            .iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }
}
