//! Storage Layer - SQLite-backed persistence
//!
//! The corpus database is produced ahead of time and read at startup:
//! - qa_entries(id, question, answer)
//! - embeddings(id, vector)
//!
//! The local escalation worksheet lives in its own file:
//! - worksheet(row_idx, col_a, col_b)

pub mod schema;
pub mod sqlite;

pub use sqlite::{CorpusStore, CorpusStats};
