//! Unresolved-question log
//!
//! Writes `(question, distance)` rows to the escalation worksheet. An empty
//! or half-filled row is reused before anything is appended, so the sheet
//! stays dense for manual review. A failed write triggers exactly one
//! reconnect followed by one plain append; after that the row is dropped.
//!
//! The connection handle and the whole read-modify-write sequence sit behind
//! one mutex, so concurrent requests never pick the same slot.

use std::sync::{Mutex, MutexGuard, PoisonError};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use super::{LogRow, SheetConnector, SheetError, SheetResult, Worksheet};

/// Where a recorded row ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "placement", content = "row", rename_all = "snake_case")]
pub enum Placement {
    /// An existing empty or partial row was overwritten (1-indexed sheet row)
    FilledRow(usize),
    /// A new row was appended at the end
    Appended,
    /// Appended through a fresh connection after the first attempt failed
    AppendedAfterReconnect,
}

/// Result of a best-effort write to the escalation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum LogOutcome {
    Logged(Placement),
    /// No connection; nothing was attempted
    Skipped(String),
    /// The write and the single retry both failed
    LostAfterRetry(String),
}

impl LogOutcome {
    pub fn is_logged(&self) -> bool {
        matches!(self, Self::Logged(_))
    }
}

enum ConnectionHandle {
    Connected(Box<dyn Worksheet>),
    Disconnected,
}

/// Process-wide writer for escalated questions
pub struct UnresolvedLog {
    connector: Box<dyn SheetConnector>,
    handle: Mutex<ConnectionHandle>,
}

impl UnresolvedLog {
    /// Create the log and attempt the initial connection
    ///
    /// A failed connection leaves the log disabled: later writes are skipped
    /// without another connection attempt.
    pub fn connect(connector: Box<dyn SheetConnector>) -> Self {
        let handle = match connector.connect() {
            Ok(sheet) => {
                info!(target_sheet = %connector.target(), "Connected to escalation sheet");
                ConnectionHandle::Connected(sheet)
            }
            Err(e) => {
                error!(target_sheet = %connector.target(), error = %e, "Could not connect to escalation sheet");
                ConnectionHandle::Disconnected
            }
        };

        Self {
            connector,
            handle: Mutex::new(handle),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(*self.lock(), ConnectionHandle::Connected(_))
    }

    pub fn target(&self) -> String {
        self.connector.target()
    }

    /// Record an escalated question; never fails the caller
    pub fn record(&self, question: &str, distance: &str) -> LogOutcome {
        let row = [question.to_string(), distance.to_string()];
        let mut handle = self.lock();

        let result = match &*handle {
            ConnectionHandle::Disconnected => {
                warn!(question, distance, "Escalation sheet not connected, row dropped");
                return LogOutcome::Skipped("escalation sheet is not connected".to_string());
            }
            ConnectionHandle::Connected(sheet) => write_to_slot(sheet.as_ref(), &row),
        };

        match result {
            Ok(placement) => LogOutcome::Logged(placement),
            Err(e) => {
                error!(error = %e, "Failed to write to escalation sheet, reconnecting");
                *handle = ConnectionHandle::Disconnected;
                self.append_after_reconnect(&mut handle, &row)
            }
        }
    }

    /// Escalated questions currently waiting in the sheet
    pub fn pending_rows(&self) -> SheetResult<Vec<LogRow>> {
        let handle = self.lock();
        let ConnectionHandle::Connected(sheet) = &*handle else {
            return Err(SheetError::Disconnected);
        };

        let rows = sheet
            .all_values()?
            .into_iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, cells)| {
                let question = cells.first().cloned().unwrap_or_default();
                if question.is_empty() {
                    return None;
                }
                Some(LogRow {
                    row: i + 1,
                    question,
                    distance: cells.get(1).cloned().unwrap_or_default(),
                })
            })
            .collect();

        Ok(rows)
    }

    fn append_after_reconnect(
        &self,
        handle: &mut MutexGuard<'_, ConnectionHandle>,
        row: &[String; 2],
    ) -> LogOutcome {
        let sheet = match self.connector.connect() {
            Ok(sheet) => sheet,
            Err(e) => {
                error!(error = %e, question = %row[0], distance = %row[1], "Reconnect failed, escalated question lost");
                return LogOutcome::LostAfterRetry(format!("reconnect failed: {}", e));
            }
        };
        info!(target_sheet = %self.connector.target(), "Reconnected to escalation sheet");

        match sheet.append_row(row) {
            Ok(()) => {
                info!(question = %row[0], distance = %row[1], "Appended escalated question after reconnect");
                **handle = ConnectionHandle::Connected(sheet);
                LogOutcome::Logged(Placement::AppendedAfterReconnect)
            }
            Err(e) => {
                error!(error = %e, question = %row[0], distance = %row[1], "Append after reconnect failed, escalated question lost");
                LogOutcome::LostAfterRetry(format!("append after reconnect failed: {}", e))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConnectionHandle> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fill the first reusable row, or append when there is none
fn write_to_slot(sheet: &dyn Worksheet, row: &[String; 2]) -> SheetResult<Placement> {
    let rows = sheet.all_values()?;

    match find_reusable_row(&rows) {
        Some(sheet_row) => {
            sheet.update_cell(sheet_row, 1, &row[0])?;
            sheet.update_cell(sheet_row, 2, &row[1])?;
            info!(row = sheet_row, question = %row[0], distance = %row[1], "Filled escalation row");
            Ok(Placement::FilledRow(sheet_row))
        }
        None => {
            sheet.append_row(row)?;
            info!(question = %row[0], distance = %row[1], "Appended escalation row");
            Ok(Placement::Appended)
        }
    }
}

/// First data row (1-indexed) that is blank or has column A or B empty
///
/// Row 1 is the header and is never reused. Missing cells count as empty.
pub fn find_reusable_row(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(1)
        .find(|(_, cells)| is_reusable(cells))
        .map(|(i, cells)| {
            debug!(row = i + 1, cells = ?cells, "Found reusable escalation row");
            i + 1
        })
}

fn is_reusable(cells: &[String]) -> bool {
    let empty = |col: usize| cells.get(col).is_none_or(|c| c.is_empty());

    // Blank rows and rows with both columns empty fall under either check.
    empty(0) || empty(1)
}
