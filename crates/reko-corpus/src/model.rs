//! Unigram, bigram and trigram tables with strict backoff

use crate::frequency::FrequencyTable;
use reko_core::CorpusStats;
use std::collections::{HashMap, HashSet};

/// Maximum number of candidates returned per query
pub const CANDIDATE_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
struct NgramTables {
    documents: Vec<Vec<String>>,
    vocabulary: HashSet<String>,
    unigrams: FrequencyTable,
    // first -> second -> count
    bigrams: HashMap<String, FrequencyTable>,
    // first -> second -> third -> count
    trigrams: HashMap<String, HashMap<String, FrequencyTable>>,
}

impl NgramTables {
    fn build(documents: &[Vec<String>]) -> Self {
        let mut tables = Self::default();

        for words in documents {
            if words.is_empty() {
                continue;
            }

            for word in words {
                tables.vocabulary.insert(word.clone());
                tables.unigrams.increment(word);
            }

            for pair in words.windows(2) {
                tables
                    .bigrams
                    .entry(pair[0].clone())
                    .or_default()
                    .increment(&pair[1]);
            }

            for triple in words.windows(3) {
                tables
                    .trigrams
                    .entry(triple[0].clone())
                    .or_default()
                    .entry(triple[1].clone())
                    .or_default()
                    .increment(&triple[2]);
            }

            tables.documents.push(words.clone());
        }

        tables
    }

    fn trigram(&self, first: &str, second: &str) -> Option<&FrequencyTable> {
        self.trigrams.get(first).and_then(|inner| inner.get(second))
    }

    fn stats(&self) -> CorpusStats {
        CorpusStats {
            vocabulary_size: self.vocabulary.len(),
            total_tokens: self.unigrams.total(),
            bigram_key_count: self.bigrams.len(),
            trigram_key_count: self.trigrams.values().map(|inner| inner.len()).sum(),
            document_count: self.documents.len(),
        }
    }
}

/// Corpus statistics with next-word candidate lookup.
///
/// The model is not ready until [`CorpusModel::load`] has run; every
/// query answers empty before that.
#[derive(Debug, Clone, Default)]
pub struct CorpusModel {
    tables: Option<NgramTables>,
}

impl CorpusModel {
    pub fn new() -> Self {
        Self { tables: None }
    }

    pub fn is_ready(&self) -> bool {
        self.tables.is_some()
    }

    /// Replace every table with counts from `documents`.
    ///
    /// Empty documents are skipped and n-grams never span two documents.
    pub fn load(&mut self, documents: &[Vec<String>]) -> CorpusStats {
        let tables = NgramTables::build(documents);
        let stats = tables.stats();
        self.tables = Some(tables);

        tracing::info!(
            documents = stats.document_count,
            vocabulary = stats.vocabulary_size,
            tokens = stats.total_tokens,
            "corpus loaded"
        );
        stats
    }

    /// Whitespace-split each text and load the result
    pub fn load_texts<S: AsRef<str>>(&mut self, texts: &[S]) -> CorpusStats {
        let documents: Vec<Vec<String>> = texts
            .iter()
            .map(|text| text.as_ref().split_whitespace().map(str::to_string).collect())
            .collect();
        self.load(&documents)
    }

    pub fn stats(&self) -> Option<CorpusStats> {
        self.tables.as_ref().map(NgramTables::stats)
    }

    /// Number of times `token` occurs in the corpus
    pub fn count(&self, token: &str) -> usize {
        self.tables
            .as_ref()
            .map(|t| t.unigrams.get(token))
            .unwrap_or(0)
    }

    /// Up to five next-word candidates for `context`, best first.
    ///
    /// Trigram on the last two tokens, then bigram on the last token, then
    /// the globally most frequent tokens.
    pub fn candidates<S: AsRef<str>>(&self, context: &[S]) -> Vec<String> {
        let Some(tables) = &self.tables else {
            return Vec::new();
        };

        let n = context.len();
        if n >= 2 {
            if let Some(next) = tables.trigram(context[n - 2].as_ref(), context[n - 1].as_ref()) {
                if !next.is_empty() {
                    return next.most_common(CANDIDATE_LIMIT);
                }
            }
        }

        if n >= 1 {
            if let Some(next) = tables.bigrams.get(context[n - 1].as_ref()) {
                if !next.is_empty() {
                    return next.most_common(CANDIDATE_LIMIT);
                }
            }
        }

        tables.unigrams.most_common(CANDIDATE_LIMIT)
    }

    /// Normalized frequency of `token` following `context`.
    ///
    /// Uses the trigram table when the context has two tokens and the pair
    /// is known, otherwise the bigram table for the last token, otherwise 0.
    pub fn base_value<S: AsRef<str>>(&self, context: &[S], token: &str) -> f64 {
        let Some(tables) = &self.tables else {
            return 0.0;
        };

        let n = context.len();
        if n >= 2 {
            if let Some(next) = tables.trigram(context[n - 2].as_ref(), context[n - 1].as_ref()) {
                return next.fraction(token);
            }
            // an unknown pair backs off to the bigram, matching `candidates`, instead of scoring 0
        }

        if n >= 1 {
            if let Some(next) = tables.bigrams.get(context[n - 1].as_ref()) {
                return next.fraction(token);
            }
        }

        0.0
    }
}
