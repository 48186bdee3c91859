//! Bounded record of generated replies and their selection traces

use reko_core::{State, Token};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of replies kept for later rating
pub const HISTORY_CAPACITY: usize = 1000;

/// One selection made while generating a reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogStep {
    pub state: State,
    pub action: Token,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub query: String,
    pub reply: String,
    pub trace: Vec<DialogStep>,
}

#[derive(Debug, Clone)]
pub struct ReplyHistory {
    records: VecDeque<ReplyRecord>,
    capacity: usize,
}

impl ReplyHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// Append a record, dropping the oldest ones past capacity
    pub fn push(&mut self, record: ReplyRecord) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// Most recent record whose query and reply both match exactly
    pub fn find_latest(&self, query: &str, reply: &str) -> Option<&ReplyRecord> {
        self.records
            .iter()
            .rev()
            .find(|r| r.query == query && r.reply == reply)
    }

    pub fn last(&self) -> Option<&ReplyRecord> {
        self.records.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ReplyHistory {
    fn default() -> Self {
        Self::new()
    }
}
