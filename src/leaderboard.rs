//! Best-episodes leaderboard
//!
//! Episodes are ranked by how long the agent survived. Ties go to the higher
//! total reward, then to the earlier entry. A seeded episode that is already
//! on the board is not recorded twice, since the same seed and policy replay
//! the same trajectory.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rollout::EpisodeSummary;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Ticks survived
    pub ticks: u64,
    pub total_reward: f64,
    pub score: f64,
    /// Ended by collision rather than the step budget
    #[serde(default)]
    pub terminated: bool,
    /// Seed the episode was reset with, when known
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Entry {
    pub fn from_summary(summary: &EpisodeSummary, seed: Option<u64>) -> Self {
        Self {
            ticks: summary.ticks,
            total_reward: summary.total_reward,
            score: summary.score,
            terminated: summary.terminated,
            seed,
        }
    }

    /// `Less` when `self` ranks above `other`
    pub fn rank_cmp(&self, other: &Entry) -> Ordering {
        other
            .ticks
            .cmp(&self.ticks)
            .then_with(|| other.total_reward.total_cmp(&self.total_reward))
    }

    fn same_run(&self, other: &Entry) -> bool {
        self.seed.is_some()
            && self.seed == other.seed
            && self.ticks == other.ticks
            && self.total_reward == other.total_reward
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<Entry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries, best first
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&Entry> {
        self.entries.first()
    }

    /// 1-based rank `entry` would take, None if it would not be recorded
    pub fn rank_of(&self, entry: &Entry) -> Option<usize> {
        if entry.ticks == 0 || self.entries.iter().any(|e| e.same_run(entry)) {
            return None;
        }
        // Equal entries already on the board stay ahead
        let pos = self
            .entries
            .partition_point(|e| e.rank_cmp(entry) != Ordering::Greater);
        (pos < MAX_ENTRIES).then_some(pos + 1)
    }

    /// Record an episode; returns the rank it took
    pub fn add(&mut self, entry: Entry) -> Option<usize> {
        let rank = self.rank_of(&entry)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Load from a JSON file; a missing file gives an empty board
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No leaderboard at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)?;
        let mut board: Leaderboard = serde_json::from_str(&json)?;
        // Hand-edited files may be out of order
        board.entries.sort_by(Entry::rank_cmp);
        board.entries.truncate(MAX_ENTRIES);
        log::info!("Loaded {} leaderboard entries", board.entries.len());
        Ok(board)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ticks: u64, seed: u64) -> Entry {
        Entry {
            ticks,
            total_reward: ticks as f64 - 101.0,
            score: ticks as f64 * 0.1,
            terminated: true,
            seed: Some(seed),
        }
    }

    fn ticks(board: &Leaderboard) -> Vec<u64> {
        board.entries().iter().map(|e| e.ticks).collect()
    }

    #[test]
    fn test_ranked_by_ticks_survived() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add(entry(50, 0)), Some(1));
        assert_eq!(board.add(entry(90, 1)), Some(1));
        assert_eq!(board.add(entry(70, 2)), Some(2));
        assert_eq!(ticks(&board), vec![90, 70, 50]);
        assert_eq!(board.best().map(|e| e.seed), Some(Some(1)));
    }

    #[test]
    fn test_tie_goes_to_higher_reward_then_earlier_entry() {
        let mut board = Leaderboard::new();
        board.add(entry(60, 0));
        let richer = Entry {
            total_reward: 59.0,
            ..entry(60, 1)
        };
        assert_eq!(board.add(richer), Some(1));
        // Same ticks and reward as seed 0: lands behind it
        assert_eq!(board.add(entry(60, 2)), Some(3));
        let seeds: Vec<Option<u64>> = board.entries().iter().map(|e| e.seed).collect();
        assert_eq!(seeds, vec![Some(1), Some(0), Some(2)]);
    }

    #[test]
    fn test_same_seeded_run_recorded_once() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add(entry(80, 4)), Some(1));
        assert_eq!(board.add(entry(80, 4)), None);
        assert_eq!(board.len(), 1);
        // Same seed, different outcome (another policy) is a different run
        assert_eq!(board.add(entry(120, 4)), Some(1));
        // Unseeded episodes cannot be told apart, keep both
        let unseeded = Entry {
            seed: None,
            ..entry(10, 0)
        };
        board.add(unseeded.clone());
        assert_eq!(board.add(unseeded), Some(4));
    }

    #[test]
    fn test_empty_episode_not_recorded() {
        let mut board = Leaderboard::new();
        assert_eq!(board.rank_of(&entry(0, 0)), None);
        assert_eq!(board.add(entry(0, 0)), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_full_board_drops_shortest() {
        let mut board = Leaderboard::new();
        for i in 1..=MAX_ENTRIES as u64 {
            board.add(entry(i * 10, i));
        }
        assert_eq!(board.len(), MAX_ENTRIES);
        assert_eq!(board.rank_of(&entry(5, 99)), None);
        // Ties with the last entry do not displace it
        assert_eq!(board.rank_of(&entry(10, 99)), None);
        assert_eq!(board.add(entry(1_000, 99)), Some(1));
        assert_eq!(board.len(), MAX_ENTRIES);
        assert_eq!(board.entries().last().map(|e| e.ticks), Some(20));
    }

    #[test]
    fn test_load_restores_order() {
        let path = std::env::temp_dir().join(format!("dino_env_board_{}.json", std::process::id()));
        let json = serde_json::json!({
            "entries": [
                { "ticks": 10, "total_reward": 9.0, "score": 1.0 },
                { "ticks": 30, "total_reward": 29.0, "score": 3.0, "seed": 7 },
            ]
        });
        std::fs::write(&path, json.to_string()).unwrap();
        let loaded = Leaderboard::load(&path).unwrap();
        assert_eq!(ticks(&loaded), vec![30, 10]);

        loaded.save(&path).unwrap();
        let reloaded = Leaderboard::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(reloaded, loaded);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = std::env::temp_dir().join("dino_env_board_does_not_exist.json");
        assert!(Leaderboard::load(&path).unwrap().is_empty());
    }
}
