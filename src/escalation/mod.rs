//! Escalation backlog
//!
//! Questions the bot cannot answer are written to an external worksheet for
//! curators. The sheet is addressed like a spreadsheet: 1-indexed rows, row 1
//! is a header, column A holds the question and column B the distance.

pub mod log;
pub mod google;
pub mod sqlite_sheet;

pub use log::{find_reusable_row, LogOutcome, Placement, UnresolvedLog};
pub use google::GoogleSheetConnector;
pub use sqlite_sheet::{SqliteSheetConnector, SqliteWorksheet};

use serde::{Deserialize, Serialize};

/// Result type for worksheet operations
pub type SheetResult<T> = std::result::Result<T, SheetError>;

/// Failures talking to the escalation worksheet
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("credentials: {0}")]
    Credentials(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("sheet API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("invalid cell: {0}")]
    InvalidCell(String),

    #[error("worksheet is not connected")]
    Disconnected,
}

/// One escalated question as stored in the worksheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRow {
    /// Sheet row number (1-indexed)
    pub row: usize,
    pub question: String,
    pub distance: String,
}

/// A row-oriented tabular store
///
/// Rows and columns are 1-indexed in `update_cell`. `all_values` returns
/// every row starting with the header; missing trailing cells may be omitted.
pub trait Worksheet: Send {
    fn all_values(&self) -> SheetResult<Vec<Vec<String>>>;

    fn update_cell(&self, row: usize, col: usize, value: &str) -> SheetResult<()>;

    fn append_row(&self, values: &[String]) -> SheetResult<()>;
}

/// Acquires a fresh handle on the worksheet
pub trait SheetConnector: Send + Sync {
    fn connect(&self) -> SheetResult<Box<dyn Worksheet>>;

    /// Human-readable name of the target, for log lines
    fn target(&self) -> String;
}
