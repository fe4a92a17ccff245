//! # Qabot - semantic FAQ answering
//!
//! Answers free-text questions by matching them against a fixed corpus of
//! question/answer pairs, and escalates the ones it cannot answer to a
//! human-curated backlog.
//!
//! Qabot provides:
//! - Sentence embeddings for incoming questions
//! - Exact nearest-neighbour search over the pre-computed corpus vectors
//! - A threshold-based match/escalate decision
//! - An escalation log on an external worksheet with slot reuse and
//!   reconnect-on-failure
//! - An HTTP chat endpoint and a CLI

pub mod corpus;
pub mod storage;
pub mod query;
pub mod escalation;
pub mod chat;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use corpus::{QaCorpus, QaEntry};
pub use query::{Decision, Embedder, MatchDecider, QueryResult, SimilarityIndex};
pub use escalation::{LogOutcome, UnresolvedLog};
pub use chat::{ChatService, Reply, ReplyKind};
pub use storage::CorpusStore;

/// Result type alias for Qabot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Qabot operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Config error: {0}")]
    Config(String),
}
