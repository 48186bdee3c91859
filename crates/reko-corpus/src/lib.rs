//! N-gram corpus model, text preprocessing, vocabulary and document loading

mod frequency;
pub mod loader;
mod model;
pub mod preprocess;
mod vocabulary;

pub use frequency::FrequencyTable;
pub use loader::{read_documents, tokenize_documents, Document, LoadError};
pub use model::{CorpusModel, CANDIDATE_LIMIT};
pub use preprocess::{
    normalize_query, preprocess, preprocess_with, text_statistics, Step, TextStatistics,
    ANALYSIS_STEPS, CORPUS_STEPS,
};
pub use vocabulary::Vocabulary;
