//! Question/answer corpus
//!
//! The corpus is the ordered list of known Q/A pairs. An entry's position is
//! its identifier, shared with the similarity index built over the same data.

use serde::{Deserialize, Serialize};

/// A single known question and its curated answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

impl QaEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Immutable, position-indexed collection of Q/A pairs
#[derive(Debug, Clone, Default)]
pub struct QaCorpus {
    entries: Vec<QaEntry>,
}

impl QaCorpus {
    pub fn new(entries: Vec<QaEntry>) -> Self {
        Self { entries }
    }

    /// Get the entry at `id`, if it exists
    pub fn get(&self, id: usize) -> Option<&QaEntry> {
        self.entries.get(id)
    }

    /// Answer text for `id`
    ///
    /// Ids come from the similarity index, which shares this corpus's id
    /// space; an out-of-range id is a startup invariant violation.
    pub fn answer(&self, id: usize) -> &str {
        &self.entries[id].answer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<QaEntry> for QaCorpus {
    fn from_iter<I: IntoIterator<Item = QaEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
