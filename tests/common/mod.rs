#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use qabot::escalation::{SheetConnector, SheetError, SheetResult, Worksheet};
use qabot::{Embedder, QaCorpus, QaEntry, QueryResult, SimilarityIndex};

/// Embeds known questions to fixed vectors, anything else to `fallback`
pub struct CountingEmbedder {
    known: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    pub calls: AtomicUsize,
}

impl CountingEmbedder {
    pub fn new(fallback: Vec<f32>) -> Self {
        Self { known: HashMap::new(), fallback, calls: AtomicUsize::new(0) }
    }

    pub fn with(mut self, question: &str, vector: Vec<f32>) -> Self {
        self.known.insert(question.to_string(), vector);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for CountingEmbedder {
    fn embed(&self, text: &str) -> qabot::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.known.get(text).cloned().unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Always returns the same nearest neighbour
pub struct FixedIndex {
    result: QueryResult,
    size: usize,
    pub calls: AtomicUsize,
}

impl FixedIndex {
    pub fn new(matched_id: usize, distance: f32, size: usize) -> Self {
        Self { result: QueryResult::new(matched_id, distance), size, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SimilarityIndex for FixedIndex {
    fn nearest(&self, _vector: &[f32]) -> qabot::Result<QueryResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result)
    }

    fn len(&self) -> usize {
        self.size
    }
}

/// Index that always fails, like a corrupted index file
pub struct BrokenIndex;

impl SimilarityIndex for BrokenIndex {
    fn nearest(&self, _vector: &[f32]) -> qabot::Result<QueryResult> {
        Err(qabot::Error::Index("corrupted".to_string()))
    }

    fn len(&self) -> usize {
        0
    }
}

#[derive(Default)]
pub struct SheetState {
    pub rows: Vec<Vec<String>>,
    pub reads: usize,
    pub writes: Vec<Vec<String>>,
}

/// In-memory worksheet recording every write
#[derive(Clone, Default)]
pub struct RecordingSheet(pub Arc<Mutex<SheetState>>);

impl RecordingSheet {
    pub fn with_header() -> Self {
        let sheet = Self::default();
        sheet.0.lock().unwrap().rows.push(vec!["question".into(), "distance".into()]);
        sheet
    }

    pub fn reads(&self) -> usize {
        self.0.lock().unwrap().reads
    }

    pub fn writes(&self) -> Vec<Vec<String>> {
        self.0.lock().unwrap().writes.clone()
    }
}

impl Worksheet for RecordingSheet {
    fn all_values(&self) -> SheetResult<Vec<Vec<String>>> {
        let mut state = self.0.lock().unwrap();
        state.reads += 1;
        Ok(state.rows.clone())
    }

    fn update_cell(&self, row: usize, col: usize, value: &str) -> SheetResult<()> {
        let mut state = self.0.lock().unwrap();
        let cells = &mut state.rows[row - 1];
        cells.resize(cells.len().max(col), String::new());
        cells[col - 1] = value.to_string();
        state.writes.push(vec![row.to_string(), col.to_string(), value.to_string()]);
        Ok(())
    }

    fn append_row(&self, values: &[String]) -> SheetResult<()> {
        let mut state = self.0.lock().unwrap();
        state.rows.push(values.to_vec());
        state.writes.push(values.to_vec());
        Ok(())
    }
}

pub struct StaticConnector {
    pub sheet: Option<RecordingSheet>,
    pub connects: Arc<AtomicUsize>,
}

impl StaticConnector {
    pub fn new(sheet: Option<RecordingSheet>) -> Self {
        Self { sheet, connects: Arc::new(AtomicUsize::new(0)) }
    }
}

impl SheetConnector for StaticConnector {
    fn connect(&self) -> SheetResult<Box<dyn Worksheet>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        match &self.sheet {
            Some(sheet) => Ok(Box::new(sheet.clone())),
            None => Err(SheetError::Credentials("credentials.json not found".to_string())),
        }
    }

    fn target(&self) -> String {
        "static".to_string()
    }
}

/// Five entries; ids 0..=4
pub fn sample_corpus() -> QaCorpus {
    (0..5)
        .map(|i| QaEntry::new(format!("question {}", i), format!("answer {}", i)))
        .collect()
}
