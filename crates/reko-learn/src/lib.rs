//! Reply policy engine: epsilon-greedy selection shaped by user feedback

mod engine;
mod history;
mod policy;
mod reward;
mod shared;

pub use engine::{Engine, GUARDED_PUNCTUATION, NOT_READY_REPLY};
pub use history::{DialogStep, ReplyHistory, ReplyRecord, HISTORY_CAPACITY};
pub use policy::{q_value, selection_weights, EpsilonGreedy, Selection, DIVERSITY_WEIGHT};
pub use reward::{RewardTable, REWARD_BOUND, REWARD_CAPACITY, REWARD_RETAIN};
pub use shared::SharedEngine;
