//! Core types for corpus statistics and policy state

use serde::{Deserialize, Serialize};
use std::fmt;

/// A word or punctuation mark produced by tokenization
pub type Token = String;

/// Marks that end a generated reply
pub const TERMINAL_MARKS: [&str; 3] = ["。", "！", "？"];

pub fn is_terminal(token: &str) -> bool {
    TERMINAL_MARKS.contains(&token)
}

/// Context key for learned rewards and action counts.
///
/// Holds the last one or two tokens of a reply as a tuple, so two
/// contexts are equal only when their tokens are equal. `"a b"` as a
/// single token and `"a", "b"` as two tokens are different states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State(Vec<Token>);

impl State {
    /// Maximum number of trailing tokens kept in a state
    pub const WIDTH: usize = 2;

    /// Build a state from the trailing tokens of `tokens`
    pub fn from_tail<S: AsRef<str>>(tokens: &[S]) -> Self {
        let start = tokens.len().saturating_sub(Self::WIDTH);
        Self(tokens[start..].iter().map(|t| t.as_ref().to_string()).collect())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Summary of a corpus load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub vocabulary_size: usize,
    pub total_tokens: usize,
    pub bigram_key_count: usize,
    pub trigram_key_count: usize,
    /// Non-empty documents that contributed to the tables
    #[serde(default)]
    pub document_count: usize,
}
