//! Shared types and configuration for corpus-driven reply generation

mod config;
mod error;
mod types;

pub use config::{AnalysisConfig, Config, GenerationConfig, LearningConfig, LoggingConfig};
pub use error::ConfigError;
pub use types::{is_terminal, CorpusStats, State, Token, TERMINAL_MARKS};
