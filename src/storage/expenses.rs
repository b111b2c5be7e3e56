//! Expense document storage
//!
//! Loads and saves the expense document, a flat JSON array of records at a
//! single path. Record order in the document is record order in memory.

use std::path::{Path, PathBuf};

use crate::error::OutlayResult;
use crate::models::ExpenseRecord;

use super::file_io::{read_json, write_json_atomic};

/// Gateway to the expense document on disk
///
/// The store is stateless: it remembers the path and moves whole record
/// lists across it. A missing document reads as an empty list; saving
/// creates the document (and any parent directories).
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store for the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records from the document
    ///
    /// Each loaded record gets a fresh session id. Order follows the
    /// document.
    pub fn load(&self) -> OutlayResult<Vec<ExpenseRecord>> {
        read_json(&self.path)
    }

    /// Save the given records as the whole document
    pub fn save(&self, records: &[ExpenseRecord]) -> OutlayResult<()> {
        write_json_atomic(&self.path, &records)
    }
}
