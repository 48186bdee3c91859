//! Thread-safe handle serialising access to one engine

use crate::engine::Engine;
use reko_core::CorpusStats;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to an [`Engine`] behind a single mutex.
///
/// Corpus tables, action counts, rewards and history are read during
/// generation and written during reward updates, so every call takes the
/// same lock.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Engine> {
        // a panic mid-update leaves the maps usable, so keep serving
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<T>(&self, f: impl FnOnce(&mut Engine) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn is_ready(&self) -> bool {
        self.lock().is_ready()
    }

    pub fn load_corpus(&self, documents: &[Vec<String>]) -> CorpusStats {
        self.lock().load_corpus(documents)
    }

    pub fn predict_next(&self, context: &str) -> Vec<String> {
        self.lock().predict_next(context)
    }

    pub fn generate_reply(&self, query: &str) -> String {
        self.lock().generate_reply(query)
    }

    pub fn update_reward(&self, query: &str, reply: &str, reward: f64) -> bool {
        self.lock().update_reward(query, reply, reward)
    }
}
