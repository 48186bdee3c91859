use super::load_corpus;
use reko_core::Config;
use reko_corpus::normalize_query;
use reko_learn::SharedEngine;
use reko_telemetry::{append_jsonl, FeedbackRecord, Paths};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Rating sent by `:good`
pub const USEFUL_RATING: f64 = 1.0;
/// Rating sent by `:bad`
pub const NOT_USEFUL_RATING: f64 = -0.5;

const HELP: &str = "Commands:\n  \
    :good            rate the last reply as useful\n  \
    :bad             rate the last reply as not useful\n  \
    :rate <value>    rate the last reply with any value\n  \
    :predict <text>  show next-word candidates\n  \
    :stats           show corpus statistics\n  \
    :help            show this help\n  \
    :quit            leave";

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Reply(String),
    Message(String),
    Quit,
}

/// One interactive session over a shared engine
pub struct ChatSession {
    engine: SharedEngine,
    journal: Option<PathBuf>,
    last_exchange: Option<(String, String)>,
}

impl ChatSession {
    pub fn new(engine: SharedEngine, journal: Option<PathBuf>) -> Self {
        Self {
            engine,
            journal,
            last_exchange: None,
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Message(String::new());
        }

        let Some(command) = line.strip_prefix(':') else {
            let query = normalize_query(line);
            let reply = self.engine.generate_reply(&query);
            self.last_exchange = Some((query, reply.clone()));
            return Outcome::Reply(reply);
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "quit" | "q" | "exit" => Outcome::Quit,
            "help" | "h" => Outcome::Message(HELP.to_string()),
            "good" => self.rate(USEFUL_RATING),
            "bad" => self.rate(NOT_USEFUL_RATING),
            "rate" => match arg.parse::<f64>() {
                Ok(value) if value.is_finite() => self.rate(value),
                _ => Outcome::Message(format!("Not a rating: {:?}", arg)),
            },
            "predict" => {
                if !self.engine.is_ready() {
                    return Outcome::Message("Load documents first.".to_string());
                }
                let candidates = self.engine.predict_next(&normalize_query(arg));
                if candidates.is_empty() {
                    Outcome::Message("No matching candidates.".to_string())
                } else {
                    Outcome::Message(format!("Possible next words: {}", candidates.join(" / ")))
                }
            }
            "stats" => self.engine.with(|engine| match engine.corpus().stats() {
                Some(s) => Outcome::Message(format!(
                    "Vocabulary: {} | Tokens: {} | Bigram keys: {} | Trigram keys: {} | Learned rewards: {} | Epsilon: {:.3}",
                    s.vocabulary_size,
                    s.total_tokens,
                    s.bigram_key_count,
                    s.trigram_key_count,
                    engine.rewards().len(),
                    engine.epsilon(),
                )),
                None => Outcome::Message("Load documents first.".to_string()),
            }),
            other => Outcome::Message(format!("Unknown command :{} (try :help)", other)),
        }
    }

    fn rate(&mut self, rating: f64) -> Outcome {
        let Some((query, reply)) = self.last_exchange.take() else {
            return Outcome::Message("Nothing to rate yet.".to_string());
        };

        let matched = self.engine.update_reward(&query, &reply, rating);
        if let Some(path) = &self.journal {
            let record = FeedbackRecord::new(&query, &reply, rating, matched);
            if let Err(e) = append_jsonl(path, &record) {
                tracing::warn!(path = %path.display(), error = %e, "failed to journal rating");
            }
        }

        let message = if !matched {
            "That reply is no longer in history."
        } else if rating > 0.0 {
            "Thanks for the feedback!"
        } else {
            "Sorry, I'll keep learning."
        };
        Outcome::Message(message.to_string())
    }
}

fn run_loop<R: BufRead, W: Write>(
    session: &mut ChatSession,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        match session.handle_line(&line?) {
            Outcome::Quit => break,
            Outcome::Reply(reply) => writeln!(output, "[ReKo] {}", reply)?,
            Outcome::Message(message) if message.is_empty() => {}
            Outcome::Message(message) => writeln!(output, "{}", message)?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    Ok(())
}

pub fn run(config: &Config, dir: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let loaded = load_corpus(config, dir, seed)?;
    println!(
        "Loaded {} documents, vocabulary {}. Type :help for commands.",
        loaded.stats.document_count, loaded.stats.vocabulary_size
    );

    let journal = Paths::new().ok().map(|p| p.feedback_file());
    let mut session = ChatSession::new(loaded.engine, journal);

    let stdin = std::io::stdin();
    run_loop(&mut session, stdin.lock(), std::io::stdout())
}
