#![allow(dead_code)]

use reko_core::Config;
use reko_learn::Engine;

pub fn sample_config() -> Config {
    let mut config = Config::new();
    config.reinforcement_learning.learning_rate = 0.15;
    config.reinforcement_learning.discount_factor = 0.8;
    config.reinforcement_learning.exploration_rate = 0.2;
    config
}

/// Config that never explores, for deterministic traces
pub fn greedy_config() -> Config {
    let mut config = Config::new();
    config.reinforcement_learning.exploration_rate = 0.0;
    config.reinforcement_learning.min_exploration_rate = 0.0;
    config
}

pub fn weather_texts() -> Vec<&'static str> {
    vec!["今天 天气 很 好 。", "今天 天气 不好 。"]
}

pub fn tokenize(texts: &[&str]) -> Vec<Vec<String>> {
    texts
        .iter()
        .map(|t| t.split_whitespace().map(str::to_string).collect())
        .collect()
}

pub fn engine_with(config: &Config, texts: &[&str], seed: u64) -> Engine {
    let mut engine = Engine::with_seed(config, seed);
    engine.load_corpus(&tokenize(texts));
    engine
}
