//! Chat service: question in, answer text out
//!
//! Drives embedder → similarity index → match decider, and escalates the
//! questions it cannot answer to the unresolved log.

use std::sync::Arc;
use serde::Serialize;
use tracing::debug;
use crate::Result;
use crate::corpus::QaCorpus;
use crate::escalation::{LogOutcome, UnresolvedLog};
use crate::query::{Decision, Embedder, MatchDecider, SimilarityIndex};

/// Returned for empty or whitespace-only questions
pub const DEFAULT_EMPTY_PROMPT: &str = "Please ask a question.";

/// Returned when no corpus entry is close enough
pub const DEFAULT_FALLBACK: &str =
    "Sorry, I don't have an answer to that yet. Could you rephrase your question?";

/// Fixed response texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub empty_prompt: String,
    pub fallback: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty_prompt: DEFAULT_EMPTY_PROMPT.to_string(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

/// How a reply was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyKind {
    /// Empty input; nothing was looked up
    Prompt,
    Matched { id: usize, distance: f32 },
    Escalated { distance: f32, outcome: LogOutcome },
}

/// Answer text plus how it was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub answer: String,
    #[serde(flatten)]
    pub kind: ReplyKind,
}

/// Answers questions from a fixed corpus
pub struct ChatService {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SimilarityIndex>,
    corpus: Arc<QaCorpus>,
    decider: MatchDecider,
    log: Arc<UnresolvedLog>,
    messages: Messages,
}

impl ChatService {
    /// `index` must cover exactly the ids of `corpus`
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityIndex>,
        corpus: Arc<QaCorpus>,
        log: Arc<UnresolvedLog>,
    ) -> Self {
        Self {
            embedder,
            index,
            corpus,
            decider: MatchDecider::default(),
            log,
            messages: Messages::default(),
        }
    }

    pub fn with_decider(mut self, decider: MatchDecider) -> Self {
        self.decider = decider;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn corpus(&self) -> &QaCorpus {
        &self.corpus
    }

    pub fn log(&self) -> &UnresolvedLog {
        &self.log
    }

    /// Answer text for `question`
    ///
    /// Errors only when embedding or the index lookup fails; escalation
    /// problems never reach the caller.
    pub fn answer(&self, question: &str) -> Result<String> {
        self.respond(question).map(|reply| reply.answer)
    }

    /// Answer `question` and report how the answer was chosen
    pub fn respond(&self, question: &str) -> Result<Reply> {
        if question.trim().is_empty() {
            return Ok(Reply {
                answer: self.messages.empty_prompt.clone(),
                kind: ReplyKind::Prompt,
            });
        }

        let vector = self.embedder.embed(question)?;
        let hit = self.index.nearest(&vector)?;
        let decision = self.decider.decide(hit.distance);
        debug!(question, matched_id = hit.matched_id, distance = hit.distance, ?decision, "Scored question");

        match decision {
            Decision::Match => Ok(Reply {
                answer: self.corpus.answer(hit.matched_id).to_string(),
                kind: ReplyKind::Matched {
                    id: hit.matched_id,
                    distance: hit.distance,
                },
            }),
            Decision::NoMatch => {
                let outcome = self.log.record(question, &hit.distance.to_string());
                Ok(Reply {
                    answer: self.messages.fallback.clone(),
                    kind: ReplyKind::Escalated {
                        distance: hit.distance,
                        outcome,
                    },
                })
            }
        }
    }
}
