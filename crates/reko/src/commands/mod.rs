pub mod chat;
pub mod config;
pub mod feedback;
pub mod predict;
pub mod reply;
pub mod stats;
pub mod version;

use reko_core::{Config, CorpusStats};
use reko_corpus::{read_documents, tokenize_documents, Document};
use reko_learn::{Engine, SharedEngine};
use std::path::{Path, PathBuf};

pub struct LoadedCorpus {
    pub engine: SharedEngine,
    pub stats: CorpusStats,
    pub documents: Vec<Document>,
}

fn build_engine(config: &Config, seed: Option<u64>) -> Engine {
    match seed {
        Some(seed) => Engine::with_seed(config, seed),
        None => Engine::new(config),
    }
}

/// Read, tokenize and load `dir` on a worker thread
pub fn load_corpus(config: &Config, dir: &Path, seed: Option<u64>) -> anyhow::Result<LoadedCorpus> {
    let engine = SharedEngine::new(build_engine(config, seed));

    let worker = {
        let engine = engine.clone();
        let dir: PathBuf = dir.to_path_buf();
        std::thread::spawn(move || -> anyhow::Result<(CorpusStats, Vec<Document>)> {
            let documents = read_documents(&dir)?;
            let tokenized = tokenize_documents(&documents);
            let stats = engine.load_corpus(&tokenized);
            Ok((stats, documents))
        })
    };

    let (stats, documents) = worker
        .join()
        .map_err(|_| anyhow::anyhow!("document loader thread panicked"))??;

    if stats.document_count == 0 {
        tracing::warn!(dir = %dir.display(), "no .txt documents found");
    }

    Ok(LoadedCorpus {
        engine,
        stats,
        documents,
    })
}
