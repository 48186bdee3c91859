//! Learned rewards per (state, action), insertion ordered and bounded

use indexmap::IndexMap;
use reko_core::{State, Token};

/// Rewards are clamped to [-REWARD_BOUND, REWARD_BOUND] after every update
pub const REWARD_BOUND: f64 = 1.5;
/// Entry count that triggers eviction
pub const REWARD_CAPACITY: usize = 5000;
/// Entries kept after eviction, newest by first insertion
pub const REWARD_RETAIN: usize = 3000;

#[derive(Debug, Clone, Default)]
pub struct RewardTable {
    // updating an existing key keeps its original position
    entries: IndexMap<(State, Token), f64>,
}

impl RewardTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &State, action: &str) -> f64 {
        self.entries
            .get(&(state.clone(), action.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Add `amount` to an entry, creating it at 0 first if absent
    pub fn add(&mut self, state: &State, action: &str, amount: f64) {
        *self
            .entries
            .entry((state.clone(), action.to_string()))
            .or_insert(0.0) += amount;
    }

    pub fn clamp_all(&mut self) {
        for value in self.entries.values_mut() {
            *value = value.clamp(-REWARD_BOUND, REWARD_BOUND);
        }
    }

    /// Keep only the last `REWARD_RETAIN` entries once over `REWARD_CAPACITY`.
    ///
    /// Returns the number of entries dropped.
    pub fn evict_if_over_capacity(&mut self) -> usize {
        if self.entries.len() <= REWARD_CAPACITY {
            return 0;
        }
        let excess = self.entries.len() - REWARD_RETAIN;
        self.entries.drain(..excess);
        excess
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&State, &Token, f64)> {
        self.entries
            .iter()
            .map(|((state, action), &value)| (state, action, value))
    }
}
