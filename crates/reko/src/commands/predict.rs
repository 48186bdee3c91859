use super::load_corpus;
use reko_core::Config;
use reko_corpus::normalize_query;
use std::path::Path;

fn format_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        return "No matching candidates.".to_string();
    }
    let mut out = String::from("Possible next words:");
    for (i, word) in candidates.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, word));
    }
    out
}

pub fn run(config: &Config, dir: &Path, context: &str) -> anyhow::Result<()> {
    let loaded = load_corpus(config, dir, None)?;
    let candidates = loaded.engine.predict_next(&normalize_query(context));
    println!("{}", format_candidates(&candidates));
    Ok(())
}
