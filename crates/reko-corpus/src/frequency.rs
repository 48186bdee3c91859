//! Occurrence counts that remember first-seen order

use indexmap::IndexMap;

/// Token counts ranked by count, ties broken by first-seen order
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize>,
    total: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
        self.total += 1;
    }

    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Fraction of the total held by `token`, 0 for an empty table
    pub fn fraction(&self, token: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(token) as f64 / self.total as f64
    }

    /// The `limit` most frequent tokens, best first
    pub fn most_common(&self, limit: usize) -> Vec<String> {
        let mut ranked: Vec<(&String, usize)> =
            self.counts.iter().map(|(token, &count)| (token, count)).collect();
        // sort_by_key is stable, so equal counts keep insertion order
        ranked.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
        ranked
            .into_iter()
            .take(limit)
            .map(|(token, _)| token.clone())
            .collect()
    }
}
