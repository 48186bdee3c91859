//! Reply generation and reward back-propagation

use crate::history::{DialogStep, ReplyHistory, ReplyRecord};
use crate::policy::{q_value, EpsilonGreedy, Selection};
use crate::reward::RewardTable;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reko_core::{is_terminal, Config, CorpusStats, LearningConfig, State, Token};
use reko_corpus::CorpusModel;
use std::collections::HashMap;

/// Reply returned before any corpus has been loaded
pub const NOT_READY_REPLY: &str = "抱歉，我还没有准备好。请先加载技术文档。";

/// Punctuation rejected once it already appears twice in a reply
pub const GUARDED_PUNCTUATION: [&str; 5] = ["，", ",", "。", "！", "？"];

/// Appended when generation stops without a terminal mark
const DEFAULT_TERMINAL: &str = "。";
/// Tokens at the end of a reply a candidate must not repeat
const REPEAT_WINDOW: usize = 3;
/// Floor on step probability when scaling reward updates
const MIN_STEP_PROBABILITY: f64 = 0.1;

const STRONG_FEEDBACK: f64 = 0.8;
const WEAK_FEEDBACK: f64 = 0.3;
const STRONG_RATE_SCALE: f64 = 1.5;
const WEAK_RATE_SCALE: f64 = 0.7;

/// Corpus model plus everything learned from feedback.
///
/// Action counts, rewards and epsilon live as long as the engine and
/// survive corpus reloads.
#[derive(Debug)]
pub struct Engine {
    corpus: CorpusModel,
    policy: EpsilonGreedy,
    learning: LearningConfig,
    max_length: usize,
    // state -> action -> times chosen
    action_counts: HashMap<State, HashMap<Token, usize>>,
    rewards: RewardTable,
    history: ReplyHistory,
    rng: StdRng,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a reproducible random stream
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &Config, rng: StdRng) -> Self {
        Self {
            corpus: CorpusModel::new(),
            policy: EpsilonGreedy::new(&config.reinforcement_learning),
            learning: config.reinforcement_learning.clone(),
            max_length: config.generation.max_length,
            action_counts: HashMap::new(),
            rewards: RewardTable::new(),
            history: ReplyHistory::new(),
            rng,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.corpus.is_ready()
    }

    pub fn corpus(&self) -> &CorpusModel {
        &self.corpus
    }

    pub fn load_corpus(&mut self, documents: &[Vec<String>]) -> CorpusStats {
        self.corpus.load(documents)
    }

    pub fn load_texts<S: AsRef<str>>(&mut self, texts: &[S]) -> CorpusStats {
        self.corpus.load_texts(texts)
    }

    /// Next-word candidates for whitespace-separated `context`
    pub fn predict_next(&self, context: &str) -> Vec<String> {
        let words: Vec<&str> = context.split_whitespace().collect();
        self.corpus.candidates(&words)
    }

    pub fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    pub fn reward(&self, state: &State, action: &str) -> f64 {
        self.rewards.get(state, action)
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    pub fn action_count(&self, state: &State, action: &str) -> usize {
        self.action_counts
            .get(state)
            .and_then(|counts| counts.get(action))
            .copied()
            .unwrap_or(0)
    }

    pub fn history(&self) -> &ReplyHistory {
        &self.history
    }

    /// Choose the next token for `state` among `actions`.
    ///
    /// Does not record the choice; `generate_reply` does that.
    pub fn select_action(&mut self, state: &State, actions: &[Token]) -> Option<Selection> {
        let corpus = &self.corpus;
        let rewards = &self.rewards;
        let counts = self.action_counts.get(state);

        self.policy.select(&mut self.rng, actions, |action| {
            let base = corpus.base_value(state.tokens(), action);
            let reward = rewards.get(state, action);
            let chosen = counts
                .and_then(|c| c.get(action))
                .copied()
                .unwrap_or(0);
            q_value(base, reward, chosen)
        })
    }

    /// Generate a reply with the configured length budget
    pub fn generate_reply(&mut self, query: &str) -> String {
        self.generate_reply_with_max(query, self.max_length)
    }

    /// Extend `query` token by token until `max_length` tokens or a terminal mark.
    ///
    /// The finished reply and its trace are kept so it can be rated later.
    pub fn generate_reply_with_max(&mut self, query: &str, max_length: usize) -> String {
        if !self.is_ready() {
            return NOT_READY_REPLY.to_string();
        }

        let mut reply: Vec<Token> = query.split_whitespace().map(str::to_string).collect();
        let mut trace = Vec::new();

        while reply.len() < max_length {
            let state = State::from_tail(&reply);
            let mut candidates = self.corpus.candidates(state.tokens());

            let Some(mut selection) = self.record_step(&state, &candidates, &mut trace) else {
                break;
            };

            if is_repetitive(&reply, &selection.action) {
                candidates.retain(|c| c != &selection.action);
                match self.record_step(&state, &candidates, &mut trace) {
                    Some(retry) if !is_repetitive(&reply, &retry.action) => selection = retry,
                    _ => break,
                }
            }

            let terminal = is_terminal(&selection.action);
            reply.push(selection.action);
            if terminal {
                break;
            }
        }

        if reply.last().is_some_and(|last| !is_terminal(last)) {
            reply.push(DEFAULT_TERMINAL.to_string());
        }

        let text = reply.join(" ");
        tracing::debug!(query, reply = %text, steps = trace.len(), "generated reply");

        self.history.push(ReplyRecord {
            query: query.to_string(),
            reply: text.clone(),
            trace,
        });
        text
    }

    fn record_step(
        &mut self,
        state: &State,
        candidates: &[Token],
        trace: &mut Vec<DialogStep>,
    ) -> Option<Selection> {
        let selection = self.select_action(state, candidates)?;
        trace.push(DialogStep {
            state: state.clone(),
            action: selection.action.clone(),
            probability: selection.probability,
        });
        *self
            .action_counts
            .entry(state.clone())
            .or_default()
            .entry(selection.action.clone())
            .or_insert(0) += 1;
        Some(selection)
    }

    /// Propagate a rating back through the trace of a generated reply.
    ///
    /// The most recent history record matching both `query` and `reply`
    /// is updated; later steps receive the undiscounted reward. Returns
    /// whether a record matched.
    pub fn update_reward(&mut self, query: &str, reply: &str, reward: f64) -> bool {
        let Some(record) = self.history.find_latest(query, reply) else {
            tracing::debug!(query, "no reply to reward");
            return false;
        };

        let mut learning_rate = self.learning.learning_rate;
        if reward.abs() > STRONG_FEEDBACK {
            learning_rate *= STRONG_RATE_SCALE;
        } else if reward.abs() < WEAK_FEEDBACK {
            learning_rate *= WEAK_RATE_SCALE;
        }

        let mut cumulative = reward;
        for step in record.trace.iter().rev() {
            let scale = 1.0 / step.probability.max(MIN_STEP_PROBABILITY);
            self.rewards
                .add(&step.state, &step.action, learning_rate * cumulative * scale);
            cumulative *= self.learning.discount_factor;
        }

        self.rewards.clamp_all();
        let evicted = self.rewards.evict_if_over_capacity();

        tracing::debug!(
            reward,
            learning_rate,
            steps = record.trace.len(),
            entries = self.rewards.len(),
            evicted,
            "reward applied"
        );
        true
    }
}

/// A token repeats when it is in the trailing window, or is guarded
/// punctuation that already occurs twice.
fn is_repetitive(reply: &[Token], token: &str) -> bool {
    let window = &reply[reply.len().saturating_sub(REPEAT_WINDOW)..];
    if window.iter().any(|t| t == token) {
        return true;
    }
    GUARDED_PUNCTUATION.contains(&token) && reply.iter().filter(|t| *t == token).count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::REWARD_BOUND;

    fn greedy_config() -> Config {
        let mut config = Config::new();
        config.reinforcement_learning.exploration_rate = 0.0;
        config.reinforcement_learning.min_exploration_rate = 0.0;
        config
    }

    fn engine_with(texts: &[&str]) -> Engine {
        let mut engine = Engine::with_seed(&greedy_config(), 11);
        engine.load_texts(texts);
        engine
    }

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_not_ready() {
        let mut engine = Engine::with_seed(&Config::new(), 1);
        assert!(engine.predict_next("").is_empty());
        assert_eq!(engine.generate_reply("你好"), NOT_READY_REPLY);
        assert!(engine.history().is_empty());
        assert!(!engine.update_reward("你好", NOT_READY_REPLY, 1.0));
    }

    #[test]
    fn test_deterministic_single_step() {
        let mut engine = engine_with(&["a b c"]);
        let reply = engine.generate_reply_with_max("a b", 3);
        assert_eq!(reply, "a b c 。");

        let record = engine.history().last().unwrap();
        assert_eq!(record.trace.len(), 1);
        assert_eq!(record.trace[0].state, State::from_tail(&["a", "b"]));
        assert_eq!(record.trace[0].action, "c");
        assert_eq!(record.trace[0].probability, 1.0);
        assert_eq!(engine.action_count(&State::from_tail(&["a", "b"]), "c"), 1);
    }

    #[test]
    fn test_strong_reward_update() {
        let mut engine = engine_with(&["a b c"]);
        let reply = engine.generate_reply_with_max("a b", 3);
        assert!(engine.update_reward("a b", &reply, 1.0));

        let state = State::from_tail(&["a", "b"]);
        // 0.1 * 1.5 (strong feedback) * 1.0 / 1.0
        assert!((engine.reward(&state, "c") - 0.15).abs() < 1e-12);

        // |-0.5| keeps the base rate
        engine.update_reward("a b", &reply, -0.5);
        assert!((engine.reward(&state, "c") - 0.10).abs() < 1e-12);

        // |0.2| is weak feedback
        engine.update_reward("a b", &reply, 0.2);
        assert!((engine.reward(&state, "c") - 0.114).abs() < 1e-12);
    }

    #[test]
    fn test_discount_walks_trace_backwards() {
        let mut engine = engine_with(&["a b c d"]);
        let reply = engine.generate_reply_with_max("a b", 4);
        assert_eq!(reply, "a b c d 。");

        engine.update_reward("a b", &reply, 1.0);
        let last = engine.reward(&State::from_tail(&["b", "c"]), "d");
        let first = engine.reward(&State::from_tail(&["a", "b"]), "c");
        assert!((last - 0.15).abs() < 1e-12);
        assert!((first - 0.15 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_low_probability_steps_get_larger_updates() {
        let mut engine = engine_with(&["a b"]);
        engine.history.push(ReplyRecord {
            query: "q".to_string(),
            reply: "r".to_string(),
            trace: vec![
                DialogStep {
                    state: State::from_tail(&["x"]),
                    action: "rare".to_string(),
                    probability: 0.01,
                },
                DialogStep {
                    state: State::from_tail(&["y"]),
                    action: "half".to_string(),
                    probability: 0.5,
                },
            ],
        });
        engine.update_reward("q", "r", 0.5);
        // probability floored at 0.1 -> scale 10, discounted once
        let rare = engine.reward(&State::from_tail(&["x"]), "rare");
        assert!((rare - 0.1 * 0.5 * 0.9 * 10.0).abs() < 1e-12);
        let half = engine.reward(&State::from_tail(&["y"]), "half");
        assert!((half - 0.1 * 0.5 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_targets_most_recent_duplicate() {
        let mut engine = engine_with(&["a b"]);
        for action in ["older", "newer"] {
            engine.history.push(ReplyRecord {
                query: "q".to_string(),
                reply: "r".to_string(),
                trace: vec![DialogStep {
                    state: State::from_tail(&["s"]),
                    action: action.to_string(),
                    probability: 1.0,
                }],
            });
        }
        assert!(engine.update_reward("q", "r", 1.0));
        let state = State::from_tail(&["s"]);
        assert_eq!(engine.reward(&state, "older"), 0.0);
        assert!(engine.reward(&state, "newer") > 0.0);
    }

    #[test]
    fn test_rewards_stay_clamped() {
        let mut engine = engine_with(&["a b c"]);
        let reply = engine.generate_reply_with_max("a b", 3);
        for _ in 0..50 {
            engine.update_reward("a b", &reply, 1.0);
        }
        assert_eq!(engine.reward(&State::from_tail(&["a", "b"]), "c"), REWARD_BOUND);
        for _ in 0..100 {
            engine.update_reward("a b", &reply, -1.0);
        }
        assert!(engine
            .rewards()
            .iter()
            .all(|(_, _, v)| (-REWARD_BOUND..=REWARD_BOUND).contains(&v)));
    }

    #[test]
    fn test_unknown_pair_is_ignored() {
        let mut engine = engine_with(&["a b c"]);
        engine.generate_reply_with_max("a b", 3);
        assert!(!engine.update_reward("a b", "something else", 1.0));
        assert!(engine.rewards().is_empty());
    }

    #[test]
    fn test_repetition_stops_when_only_candidate_repeats() {
        let mut engine = engine_with(&["a a a a a"]);
        let reply = engine.generate_reply_with_max("a", 10);
        assert_eq!(reply, "a 。");
        // only the rejected pick was traced
        assert_eq!(engine.history().last().unwrap().trace.len(), 1);
    }

    #[test]
    fn test_repetition_stops_when_retry_also_repeats() {
        // after "a b" the trigram offers only "a" and "b", both in the window
        let mut engine = engine_with(&["a b a", "a b b"]);
        let reply = engine.generate_reply_with_max("a b", 10);
        assert_eq!(reply, "a b 。");

        let state = State::from_tail(&["a", "b"]);
        let trace = &engine.history().last().unwrap().trace;
        assert_eq!(trace.len(), 2);
        assert!(trace.iter().all(|step| step.state == state));
        assert_ne!(trace[0].action, trace[1].action);
        assert_eq!(engine.action_count(&state, "a"), 1);
        assert_eq!(engine.action_count(&state, "b"), 1);
    }

    #[test]
    fn test_repetition_retries_with_other_candidate() {
        // after "x y" the trigram offers "x" (repeat) and "z"
        let mut engine = engine_with(&["x y x", "x y x", "x y z"]);
        let reply = engine.generate_reply_with_max("x y", 3);
        assert_eq!(reply, "x y z 。");
    }

    #[test]
    fn test_guarded_punctuation() {
        assert!(is_repetitive(&tokens(&["a", "，", "b", "，", "c", "d", "e"]), "，"));
        assert!(!is_repetitive(&tokens(&["a", "，", "b", "c", "d"]), "，"));
        assert!(is_repetitive(&tokens(&["a", "b", "c"]), "b"));
        assert!(!is_repetitive(&tokens(&["a", "b", "c", "d"]), "a"));
    }

    #[test]
    fn test_stops_at_terminal_mark() {
        let mut engine = engine_with(&["你 好 ！ 再见"]);
        let reply = engine.generate_reply_with_max("你", 10);
        assert_eq!(reply, "你 好 ！");
    }

    #[test]
    fn test_reward_biases_selection() {
        let mut engine = engine_with(&["x a", "x b"]);
        let state = State::from_tail(&["x"]);
        engine.rewards.add(&state, "b", REWARD_BOUND);

        let actions = tokens(&["a", "b"]);
        let mut picked_b = 0;
        for _ in 0..400 {
            let selection = engine.select_action(&state, &actions).unwrap();
            if selection.action == "b" {
                picked_b += 1;
            }
        }
        assert!(picked_b > 240, "rewarded action should dominate: {}", picked_b);
    }

    #[test]
    fn test_rewards_survive_reload() {
        let mut engine = engine_with(&["a b c"]);
        let reply = engine.generate_reply_with_max("a b", 3);
        engine.update_reward("a b", &reply, 1.0);
        engine.load_texts(&["totally different corpus"]);
        assert!(engine.reward(&State::from_tail(&["a", "b"]), "c") > 0.0);
        assert_eq!(engine.action_count(&State::from_tail(&["a", "b"]), "c"), 1);
    }

    #[test]
    fn test_epsilon_shared_across_replies() {
        let mut engine = Engine::with_seed(&Config::new(), 5);
        engine.load_texts(&["a b c d e f"]);
        let start = engine.epsilon();
        engine.generate_reply("a");
        let after_one = engine.epsilon();
        engine.generate_reply("a");
        assert!(after_one < start);
        assert!(engine.epsilon() < after_one);
        assert!(engine.epsilon() >= 0.05);
    }
}
