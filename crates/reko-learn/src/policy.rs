//! Epsilon-greedy action selection

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use reko_core::{LearningConfig, Token};

/// Scale of the bonus given to rarely chosen actions
pub const DIVERSITY_WEIGHT: f64 = 0.1;

/// Blend corpus likelihood, learned reward and a novelty bonus
pub fn q_value(base_value: f64, reward: f64, times_chosen: usize) -> f64 {
    base_value * (1.0 + reward) + DIVERSITY_WEIGHT / (times_chosen as f64 + 1.0)
}

/// Turn q values into a sampling distribution.
///
/// Negative q values get zero weight. When nothing is positive the
/// distribution is uniform.
pub fn selection_weights(q_values: &[f64]) -> Vec<f64> {
    let clamped: Vec<f64> = q_values.iter().map(|&q| q.max(0.0)).collect();
    let total: f64 = clamped.iter().sum();
    if total == 0.0 || !total.is_finite() {
        let uniform = 1.0 / q_values.len() as f64;
        return vec![uniform; q_values.len()];
    }
    clamped.iter().map(|q| q / total).collect()
}

/// A chosen action and the probability it was drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub action: Token,
    pub probability: f64,
}

/// Epsilon-greedy policy with multiplicative epsilon decay.
///
/// Epsilon belongs to the policy instance and decays on every selection,
/// exploring or not, down to its floor.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    decay: f64,
    floor: f64,
}

impl EpsilonGreedy {
    pub fn new(config: &LearningConfig) -> Self {
        Self {
            epsilon: config.exploration_rate,
            decay: config.exploration_decay,
            floor: config.min_exploration_rate,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Pick one of `actions`, scoring with `q` only when exploiting.
    ///
    /// Returns `None` for an empty action list.
    pub fn select<R, F>(&mut self, rng: &mut R, actions: &[Token], q: F) -> Option<Selection>
    where
        R: Rng + ?Sized,
        F: Fn(&str) -> f64,
    {
        if actions.is_empty() {
            return None;
        }

        let selection = if rng.gen::<f64>() < self.epsilon {
            let index = rng.gen_range(0..actions.len());
            Selection {
                action: actions[index].clone(),
                probability: 1.0 / actions.len() as f64,
            }
        } else {
            exploit(rng, actions, q)
        };

        self.epsilon = (self.epsilon * self.decay).max(self.floor);
        Some(selection)
    }
}

fn exploit<R, F>(rng: &mut R, actions: &[Token], q: F) -> Selection
where
    R: Rng + ?Sized,
    F: Fn(&str) -> f64,
{
    let mut scored: Vec<(f64, &Token)> = actions.iter().map(|a| (q(a), a)).collect();
    // stable, so equal q values keep candidate order
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let q_values: Vec<f64> = scored.iter().map(|(q, _)| *q).collect();
    let weights = selection_weights(&q_values);

    let index = match WeightedIndex::new(&weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..weights.len()),
    };

    Selection {
        action: scored[index].1.clone(),
        probability: weights[index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn greedy_config() -> LearningConfig {
        LearningConfig {
            exploration_rate: 0.0,
            min_exploration_rate: 0.0,
            ..LearningConfig::default()
        }
    }

    #[test]
    fn test_q_value_formula() {
        assert!((q_value(0.5, 0.0, 0) - 0.6).abs() < 1e-12);
        assert!((q_value(0.5, 1.0, 1) - 1.05).abs() < 1e-12);
        assert!((q_value(0.0, 1.5, 9) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_weights_normalize() {
        let weights = selection_weights(&[3.0, 1.0]);
        assert_eq!(weights, vec![0.75, 0.25]);
    }

    #[test]
    fn test_weights_zero_sum_is_uniform() {
        let weights = selection_weights(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(weights, vec![0.25; 4]);
    }

    #[test]
    fn test_weights_clamp_negative_q() {
        let weights = selection_weights(&[0.4, -0.2, 0.1]);
        assert!((weights[0] - 0.8).abs() < 1e-12);
        assert_eq!(weights[1], 0.0);
        assert!((weights[2] - 0.2).abs() < 1e-12);

        let all_negative = selection_weights(&[-0.1, -0.3]);
        assert_eq!(all_negative, vec![0.5, 0.5]);
    }

    #[test]
    fn test_empty_actions() {
        let mut policy = EpsilonGreedy::new(&LearningConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(policy.select(&mut rng, &[], |_| 1.0).is_none());
        assert_eq!(policy.epsilon(), 0.1, "no decay without a selection");
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let mut policy = EpsilonGreedy::new(&LearningConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        let actions = tokens(&["a", "b"]);

        policy.select(&mut rng, &actions, |_| 1.0);
        assert!((policy.epsilon() - 0.1 * 0.995).abs() < 1e-12);

        for _ in 0..1000 {
            policy.select(&mut rng, &actions, |_| 1.0);
        }
        assert_eq!(policy.epsilon(), 0.05);
    }

    #[test]
    fn test_exploit_never_picks_zero_weight() {
        let mut policy = EpsilonGreedy::new(&greedy_config());
        let mut rng = StdRng::seed_from_u64(42);
        let actions = tokens(&["good", "bad"]);
        for _ in 0..200 {
            let selection = policy
                .select(&mut rng, &actions, |a| if a == "good" { 0.5 } else { -0.3 })
                .unwrap();
            assert_eq!(selection.action, "good");
            assert_eq!(selection.probability, 1.0);
        }
    }

    #[test]
    fn test_explore_reports_uniform_probability() {
        let config = LearningConfig {
            exploration_rate: 1.0,
            min_exploration_rate: 1.0,
            exploration_decay: 1.0,
            ..LearningConfig::default()
        };
        let mut policy = EpsilonGreedy::new(&config);
        let mut rng = StdRng::seed_from_u64(3);
        let actions = tokens(&["a", "b", "c", "d"]);
        let selection = policy.select(&mut rng, &actions, |_| 0.0).unwrap();
        assert_eq!(selection.probability, 0.25);
        assert!(actions.contains(&selection.action));
    }
}
