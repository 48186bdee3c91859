//! Collect `.txt` documents from a folder tree

use crate::preprocess::preprocess;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A raw document read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

/// Read every non-blank `.txt` file under `root`, sorted by path.
///
/// Files that cannot be read as UTF-8 are logged and skipped.
pub fn read_documents(root: &Path) -> Result<Vec<Document>, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::NotADirectory(root.to_path_buf()));
    }

    let mut paths = Vec::new();
    collect_text_files(root, &mut paths)?;
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        match std::fs::read_to_string(&path) {
            Ok(text) if !text.trim().is_empty() => documents.push(Document { path, text }),
            Ok(_) => tracing::debug!(path = %path.display(), "skipping blank document"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to read document"),
        }
    }

    tracing::info!(root = %root.display(), count = documents.len(), "documents read");
    Ok(documents)
}

fn collect_text_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_text_files(&path, out)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            out.push(path);
        }
    }
    Ok(())
}

/// Run each document through the preprocessing pipeline
pub fn tokenize_documents(documents: &[Document]) -> Vec<Vec<String>> {
    documents.iter().map(|d| preprocess(&d.text)).collect()
}
