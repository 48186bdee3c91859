use super::load_corpus;
use reko_core::Config;
use reko_corpus::normalize_query;
use std::path::Path;

pub fn run(
    config: &Config,
    dir: &Path,
    query: &str,
    max_length: Option<usize>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if max_length == Some(0) {
        anyhow::bail!("--max-length must be at least 1");
    }

    let loaded = load_corpus(config, dir, seed)?;
    let query = normalize_query(query);
    let reply = loaded.engine.with(|engine| match max_length {
        Some(n) => engine.generate_reply_with_max(&query, n),
        None => engine.generate_reply(&query),
    });
    println!("{}", reply);
    Ok(())
}
