//! Query pipeline: question text → embedding → nearest corpus entry → decision
//!
//! The embedding model and the similarity index sit behind traits so the
//! chat service can be driven by any implementation (and by test doubles).

pub mod decider;
pub mod embedding;
pub mod index;

pub use decider::{Decision, MatchDecider, DEFAULT_THRESHOLD};
pub use embedding::EmbeddingEngine;
pub use index::FlatIndex;

use crate::Result;

/// Nearest corpus entry for a query vector
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QueryResult {
    pub matched_id: usize,
    pub distance: f32,
}

impl QueryResult {
    pub fn new(matched_id: usize, distance: f32) -> Self {
        Self { matched_id, distance }
    }
}

/// Maps a question to a fixed-dimension vector
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Finds the stored vector closest to a query vector
pub trait SimilarityIndex: Send + Sync {
    fn nearest(&self, vector: &[f32]) -> Result<QueryResult>;

    /// Number of indexed items
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
