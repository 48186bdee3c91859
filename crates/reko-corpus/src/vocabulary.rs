//! Frequency-filtered vocabulary and word-index sequences

use crate::frequency::FrequencyTable;
use crate::preprocess::{preprocess_with, ANALYSIS_STEPS};
use indexmap::IndexSet;
use reko_core::AnalysisConfig;

/// Words numbered by descending frequency, ties in first-seen order.
///
/// Texts pass through the analysis pipeline, so stop words and single
/// characters never get an index.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: IndexSet<String>,
}

impl Vocabulary {
    pub fn build<S: AsRef<str>>(texts: &[S], config: &AnalysisConfig) -> Self {
        Self::with_limits(texts, config.min_word_frequency, config.max_vocabulary_size)
    }

    /// Keep words seen at least `min_freq` times, at most `max_size` of them
    pub fn with_limits<S: AsRef<str>>(texts: &[S], min_freq: usize, max_size: usize) -> Self {
        let mut counts = FrequencyTable::new();
        for text in texts {
            for word in preprocess_with(text.as_ref(), ANALYSIS_STEPS) {
                counts.increment(&word);
            }
        }

        let words: IndexSet<String> = counts
            .most_common(counts.len())
            .into_iter()
            .filter(|word| counts.get(word) >= min_freq)
            .take(max_size)
            .collect();

        tracing::info!(size = words.len(), min_freq, max_size, "vocabulary built");
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words.get_index_of(word)
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get_index(index).map(String::as_str)
    }

    /// Indices of the known words of `text`; unknown words are skipped
    pub fn text_to_sequence(&self, text: &str) -> Vec<usize> {
        preprocess_with(text, ANALYSIS_STEPS)
            .iter()
            .filter_map(|word| self.index_of(word))
            .collect()
    }
}
