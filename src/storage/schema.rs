//! Database schema definitions

/// SQL to create the Q/A entries table
///
/// `id` is the 0-based corpus position.
pub const CREATE_QA_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS qa_entries (
    id INTEGER PRIMARY KEY,
    question TEXT NOT NULL,
    answer TEXT NOT NULL
)
"#;

/// SQL to create the embeddings table (little-endian f32 blobs)
pub const CREATE_EMBEDDINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS embeddings (
    id INTEGER PRIMARY KEY,
    vector BLOB NOT NULL
)
"#;

/// SQL to create the local escalation worksheet
///
/// `row_idx` is 1-based like a spreadsheet; row 1 is the header.
pub const CREATE_WORKSHEET_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS worksheet (
    row_idx INTEGER PRIMARY KEY,
    col_a TEXT NOT NULL DEFAULT '',
    col_b TEXT NOT NULL DEFAULT ''
)
"#;

/// Statements for the corpus database
pub fn corpus_schema_statements() -> Vec<&'static str> {
    vec![CREATE_QA_ENTRIES_TABLE, CREATE_EMBEDDINGS_TABLE]
}

/// Statements for the worksheet database
pub fn worksheet_schema_statements() -> Vec<&'static str> {
    vec![CREATE_WORKSHEET_TABLE]
}
