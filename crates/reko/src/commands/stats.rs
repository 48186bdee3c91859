use super::load_corpus;
use reko_core::{Config, CorpusStats};
use reko_corpus::{text_statistics, TextStatistics, Vocabulary};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct StatsReport {
    corpus: CorpusStats,
    text: TextStatistics,
    /// Content words passing the configured frequency filter
    content_vocabulary: usize,
    min_word_frequency: usize,
}

fn format_report(report: &StatsReport) -> String {
    let c = &report.corpus;
    let t = &report.text;
    format!(
        "Corpus\n\
         ======\n  \
         Documents: {}\n  \
         Vocabulary: {}\n  \
         Total tokens: {}\n  \
         Bigram keys: {}\n  \
         Trigram keys: {}\n\
         \n\
         Text\n\
         ====\n  \
         Characters: {}\n  \
         Sentences: {}\n  \
         Unique words: {}\n  \
         Avg word length: {:.2}\n  \
         Vocabulary richness: {:.1}%\n  \
         Content vocabulary (min freq {}): {}",
        c.document_count,
        c.vocabulary_size,
        c.total_tokens,
        c.bigram_key_count,
        c.trigram_key_count,
        t.char_count,
        t.sentence_count,
        t.unique_words,
        t.avg_word_length,
        t.vocabulary_richness * 100.0,
        report.min_word_frequency,
        report.content_vocabulary,
    )
}

pub fn run(config: &Config, dir: &Path, json: bool) -> anyhow::Result<()> {
    let loaded = load_corpus(config, dir, None)?;
    let texts: Vec<&str> = loaded.documents.iter().map(|d| d.text.as_str()).collect();
    let vocabulary = Vocabulary::build(&texts, &config.analysis);
    let report = StatsReport {
        corpus: loaded.stats,
        text: text_statistics(&texts.join("\n")),
        content_vocabulary: vocabulary.len(),
        min_word_frequency: config.analysis.min_word_frequency,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_report(&report));
    }
    Ok(())
}
