//! JSON Export functionality
//!
//! Exports the expense list to JSON format with schema versioning.

use crate::error::OutlayResult;
use crate::models::{ExpenseRecord, Money};
use crate::services::total;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full expense export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All expense records
    pub expenses: Vec<ExpenseRecord>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of expenses
    pub expense_count: usize,

    /// Sum of all expense amounts
    pub total_amount: Money,

    /// Date range of expenses (earliest)
    pub earliest_expense: Option<String>,

    /// Date range of expenses (latest)
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Create a new full export from a record list
    pub fn from_records(records: &[ExpenseRecord]) -> Self {
        let earliest_expense = records.iter().map(|r| r.date).min().map(|d| d.to_string());
        let latest_expense = records.iter().map(|r| r.date).max().map(|d| d.to_string());

        let metadata = ExportMetadata {
            expense_count: records.len(),
            total_amount: total(records),
            earliest_expense,
            latest_expense,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses: records.to_vec(),
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        // Check schema version
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        // Metadata must agree with the record list
        if self.metadata.expense_count != self.expenses.len() {
            return Err(format!(
                "Metadata expense count {} does not match {} records",
                self.metadata.expense_count,
                self.expenses.len()
            ));
        }

        if self.metadata.total_amount != total(&self.expenses) {
            return Err(format!(
                "Metadata total {} does not match the summed records",
                self.metadata.total_amount
            ));
        }

        Ok(())
    }
}

/// Export the expense list to JSON
pub fn export_full_json<W: Write>(
    records: &[ExpenseRecord],
    writer: &mut W,
    pretty: bool,
) -> OutlayResult<()> {
    let export = FullExport::from_records(records);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export (for verification/restore)
pub fn import_from_json(json_str: &str) -> OutlayResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)
        .map_err(|e| crate::error::OutlayError::Import(e.to_string()))?;

    // Validate the import
    export
        .validate()
        .map_err(crate::error::OutlayError::Import)?;

    Ok(export)
}
