//! Journal record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rating given to a generated reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub reply: String,
    pub rating: f64,
    /// Whether the rating found its reply in the engine history
    #[serde(default)]
    pub matched: bool,
}

impl FeedbackRecord {
    pub fn new(query: &str, reply: &str, rating: f64, matched: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            query: query.to_string(),
            reply: reply.to_string(),
            rating,
            matched,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.rating > 0.0
    }
}
