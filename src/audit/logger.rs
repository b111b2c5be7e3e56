//! Audit logger for the append-only mutation journal
//!
//! Provides the AuditLogger struct that writes audit entries to a journal
//! file. Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{OutlayError, OutlayResult};

use super::entry::AuditEntry;

/// Handles writing audit entries to the journal file
///
/// The journal uses a line-delimited JSON format (JSONL) where each line
/// is a complete JSON object representing one audit entry.
#[derive(Debug)]
pub struct AuditLogger {
    /// Path to the journal file
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Log an audit entry
    ///
    /// Appends the entry as a JSON line to the journal file.
    /// Each write is flushed immediately to ensure durability.
    pub fn log(&self, entry: &AuditEntry) -> OutlayResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| OutlayError::Io(format!("Failed to open audit journal: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| OutlayError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| OutlayError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| OutlayError::Io(format!("Failed to flush audit journal: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries from the journal file
    ///
    /// Returns entries in chronological order (oldest first).
    pub fn read_all(&self) -> OutlayResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| OutlayError::Io(format!("Failed to open audit journal: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                OutlayError::Io(format!(
                    "Failed to read audit journal line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                OutlayError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the journal
    pub fn read_recent(&self, count: usize) -> OutlayResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Get the number of entries in the journal
    pub fn entry_count(&self) -> OutlayResult<usize> {
        Ok(self.read_all()?.len())
    }

    /// Check if the journal file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the journal file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
