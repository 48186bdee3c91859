mod common;

use common::tokenize;
use reko_corpus::CorpusModel;
use std::collections::HashSet;

#[test]
fn test_stats_match_tables() {
    let texts = [
        "the cat sat on the mat .",
        "the dog sat .",
        "",
        "a cat and a dog .",
    ];
    let docs = tokenize(&texts);
    let mut model = CorpusModel::new();
    let stats = model.load(&docs);

    let distinct: HashSet<&String> = docs.iter().flatten().collect();
    assert_eq!(stats.vocabulary_size, distinct.len());

    let total: usize = distinct.iter().map(|t| model.count(t)).sum();
    assert_eq!(stats.total_tokens, total);
    assert_eq!(stats.total_tokens, docs.iter().map(Vec::len).sum::<usize>());
    assert_eq!(stats.document_count, 3);
}

#[test]
fn test_candidates_before_and_after_load() {
    let mut model = CorpusModel::new();
    assert!(model.candidates::<&str>(&[]).is_empty());

    model.load(&tokenize(&["a a a b b c d e f"]));
    let top = model.candidates::<&str>(&[]);
    assert_eq!(top, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_trigram_ranks_before_bigram_only_tokens() {
    let mut model = CorpusModel::new();
    model.load(&tokenize(&["a b c", "a b d", "x b e", "x b e"]));

    let next = model.candidates(&["a", "b"]);
    assert_eq!(next, vec!["c", "d"]);
    assert!(!next.contains(&"e".to_string()));
}

#[test]
fn test_pairs_never_span_documents() {
    let mut model = CorpusModel::new();
    model.load(&tokenize(&["start end", "begin finish"]));
    // "end" only closes a document, so it has no continuation of its own
    assert_eq!(model.base_value(&["end"], "begin"), 0.0);
    assert_eq!(model.base_value(&["start", "end"], "begin"), 0.0);
}

#[test]
fn test_weather_scenario_candidates() {
    let mut model = CorpusModel::new();
    model.load(&tokenize(&common::weather_texts()));
    let next = model.candidates(&["今天", "天气"]);
    assert!(next.contains(&"很".to_string()));
    assert!(next.contains(&"不好".to_string()));
    // equal counts keep first-seen order
    assert_eq!(next, vec!["很", "不好"]);
}
