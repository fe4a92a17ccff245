//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::corpus::{QaCorpus, QaEntry};
use super::schema;

/// SQLite-backed storage for the Q/A corpus and its vectors
pub struct CorpusStore {
    conn: Connection,
}

/// Summary of what a corpus database holds
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CorpusStats {
    pub entries: usize,
    pub embeddings: usize,
    pub dimension: Option<usize>,
}

impl std::fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Q/A entries: {}", self.entries)?;
        writeln!(f, "Embeddings:  {}", self.embeddings)?;
        match self.dimension {
            Some(dim) => write!(f, "Dimension:   {}", dim),
            None => write!(f, "Dimension:   -"),
        }
    }
}

impl CorpusStore {
    /// Open a corpus database file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Corpus(format!("corpus database not found: {}", path.display())));
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::corpus_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Entry Operations ==========

    /// Insert or replace the entry at corpus position `id`
    pub fn insert_entry(&self, id: usize, entry: &QaEntry) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO qa_entries (id, question, answer) VALUES (?1, ?2, ?3)",
            params![id as i64, entry.question, entry.answer],
        )?;
        Ok(())
    }

    /// Load the whole corpus in id order
    ///
    /// Fails unless ids are exactly `0..n`.
    pub fn load_corpus(&self) -> Result<QaCorpus> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question, answer FROM qa_entries ORDER BY id"
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, QaEntry {
                question: row.get(1)?,
                answer: row.get(2)?,
            }))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, entry) = row?;
            if id != entries.len() as i64 {
                return Err(Error::Corpus(format!(
                    "qa_entries ids must be contiguous from 0, found {} at position {}",
                    id,
                    entries.len()
                )));
            }
            entries.push(entry);
        }

        Ok(QaCorpus::new(entries))
    }

    pub fn count_entries(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM qa_entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Embedding Operations ==========

    /// Insert or replace the vector for corpus position `id`
    pub fn insert_embedding(&self, id: usize, vector: &[f32]) -> Result<()> {
        let blob: Vec<u8> = vector.iter().flat_map(|f| f.to_le_bytes()).collect();

        self.conn.execute(
            "INSERT OR REPLACE INTO embeddings (id, vector) VALUES (?1, ?2)",
            params![id as i64, blob],
        )?;
        Ok(())
    }

    /// Load every vector in id order
    ///
    /// Fails unless ids are exactly `0..n`.
    pub fn load_embeddings(&self) -> Result<Vec<Vec<f32>>> {
        let mut stmt = self.conn.prepare("SELECT id, vector FROM embeddings ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            Ok((id, blob))
        })?;

        let mut vectors = Vec::new();
        for row in rows {
            let (id, blob) = row?;
            if id != vectors.len() as i64 {
                return Err(Error::Corpus(format!(
                    "embedding ids must be contiguous from 0, found {} at position {}",
                    id,
                    vectors.len()
                )));
            }
            if blob.len() % 4 != 0 {
                return Err(Error::Corpus(format!("embedding {} is not a whole number of f32 values", id)));
            }
            vectors.push(decode_vector(&blob));
        }

        Ok(vectors)
    }

    pub fn count_embeddings(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM embeddings", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<CorpusStats> {
        let dimension: Option<i64> = self.conn
            .query_row(
                "SELECT length(vector) / 4 FROM embeddings ORDER BY id LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(CorpusStats {
            entries: self.count_entries()?,
            embeddings: self.count_embeddings()?,
            dimension: dimension.map(|d| d as usize),
        })
    }
}

fn decode_vector(blob: &[u8]) -> Vec<f32> {
    blob.chunks(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
