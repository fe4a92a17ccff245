//! Local escalation worksheet backed by SQLite
//!
//! Mirrors the two tracked columns of the hosted sheet in a single table so
//! the service can run without Google credentials.

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params};
use crate::storage::schema;
use super::{SheetConnector, SheetError, SheetResult, Worksheet};

const HEADER: [&str; 2] = ["question", "distance"];

/// Opens the worksheet database at a fixed path
#[derive(Debug, Clone)]
pub struct SqliteSheetConnector {
    path: PathBuf,
}

impl SqliteSheetConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SheetConnector for SqliteSheetConnector {
    fn connect(&self) -> SheetResult<Box<dyn Worksheet>> {
        Ok(Box::new(SqliteWorksheet::open(&self.path)?))
    }

    fn target(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

/// Two-column worksheet stored in the `worksheet` table
pub struct SqliteWorksheet {
    conn: Connection,
}

impl SqliteWorksheet {
    /// Open (or create) a worksheet file; a new sheet gets a header row
    pub fn open(path: &Path) -> SheetResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory worksheet (for testing)
    pub fn open_in_memory() -> SheetResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> SheetResult<Self> {
        for stmt in schema::worksheet_schema_statements() {
            conn.execute(stmt, [])?;
        }
        conn.execute(
            "INSERT OR IGNORE INTO worksheet (row_idx, col_a, col_b) VALUES (1, ?1, ?2)",
            params![HEADER[0], HEADER[1]],
        )?;
        Ok(Self { conn })
    }
}

impl Worksheet for SqliteWorksheet {
    fn all_values(&self) -> SheetResult<Vec<Vec<String>>> {
        let mut stmt = self.conn.prepare(
            "SELECT row_idx, col_a, col_b FROM worksheet ORDER BY row_idx"
        )?;

        let stored = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;

        // Rows never written are returned blank, as a spreadsheet would.
        let mut rows: Vec<Vec<String>> = Vec::new();
        for entry in stored {
            let (row_idx, a, b) = entry?;
            while (rows.len() as i64) < row_idx - 1 {
                rows.push(Vec::new());
            }
            rows.push(vec![a, b]);
        }

        Ok(rows)
    }

    fn update_cell(&self, row: usize, col: usize, value: &str) -> SheetResult<()> {
        if row == 0 {
            return Err(SheetError::InvalidCell("rows are 1-indexed".to_string()));
        }
        let sql = match col {
            1 => "INSERT INTO worksheet (row_idx, col_a) VALUES (?1, ?2)
                  ON CONFLICT(row_idx) DO UPDATE SET col_a = excluded.col_a",
            2 => "INSERT INTO worksheet (row_idx, col_b) VALUES (?1, ?2)
                  ON CONFLICT(row_idx) DO UPDATE SET col_b = excluded.col_b",
            other => return Err(SheetError::InvalidCell(format!("column {} is not tracked", other))),
        };

        self.conn.execute(sql, params![row as i64, value])?;
        Ok(())
    }

    fn append_row(&self, values: &[String]) -> SheetResult<()> {
        let a = values.first().map(String::as_str).unwrap_or("");
        let b = values.get(1).map(String::as_str).unwrap_or("");

        self.conn.execute(
            "INSERT INTO worksheet (row_idx, col_a, col_b)
             VALUES ((SELECT COALESCE(MAX(row_idx), 0) + 1 FROM worksheet), ?1, ?2)",
            params![a, b],
        )?;
        Ok(())
    }
}
