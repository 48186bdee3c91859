//! On-disk locations, JSONL journal I/O and feedback records

mod io;
mod paths;
mod types;

pub use io::{append_jsonl, atomic_write, read_jsonl};
pub use paths::Paths;
pub use types::FeedbackRecord;
