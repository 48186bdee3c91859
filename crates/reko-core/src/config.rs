//! Configuration for reply generation and reward learning

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reinforcement-learning scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Base step size for reward updates
    pub learning_rate: f64,

    /// Per-step discount applied walking a trace backwards
    pub discount_factor: f64,

    /// Initial epsilon for the epsilon-greedy policy
    pub exploration_rate: f64,

    /// Multiplier applied to epsilon after every selection
    pub exploration_decay: f64,

    /// Floor for epsilon decay
    pub min_exploration_rate: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 0.1,
            exploration_decay: 0.995,
            min_exploration_rate: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Token budget for a reply, query tokens included
    pub max_length: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { max_length: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Vocabulary construction for corpus analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Words seen fewer times are left out of the vocabulary
    pub min_word_frequency: usize,

    pub max_vocabulary_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_word_frequency: 2,
            max_vocabulary_size: 10000,
        }
    }
}

/// Top-level configuration, one YAML section per concern.
///
/// Every field has a default, so a file only needs the keys it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reinforcement_learning: LearningConfig,
    pub generation: GenerationConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rl = &self.reinforcement_learning;

        if rl.learning_rate.is_nan() || rl.learning_rate <= 0.0 {
            return Err(invalid(
                "reinforcement_learning.learning_rate",
                format!("must be positive, got {}", rl.learning_rate),
            ));
        }
        check_unit("reinforcement_learning.discount_factor", rl.discount_factor)?;
        check_unit("reinforcement_learning.exploration_rate", rl.exploration_rate)?;
        check_unit(
            "reinforcement_learning.min_exploration_rate",
            rl.min_exploration_rate,
        )?;
        if rl.exploration_decay <= 0.0 || !(0.0..=1.0).contains(&rl.exploration_decay) {
            return Err(invalid(
                "reinforcement_learning.exploration_decay",
                format!("must be in (0, 1], got {}", rl.exploration_decay),
            ));
        }
        if rl.min_exploration_rate > rl.exploration_rate {
            return Err(invalid(
                "reinforcement_learning.min_exploration_rate",
                format!(
                    "{} exceeds exploration_rate {}",
                    rl.min_exploration_rate, rl.exploration_rate
                ),
            ));
        }
        if self.generation.max_length == 0 {
            return Err(invalid("generation.max_length", "must be at least 1".to_string()));
        }
        if self.analysis.max_vocabulary_size == 0 {
            return Err(invalid(
                "analysis.max_vocabulary_size",
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_unit(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, format!("must be in [0, 1], got {}", value)))
    }
}

fn invalid(key: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { key, reason }
}
