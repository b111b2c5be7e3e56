//! CSV Export functionality
//!
//! Exports expense records and category totals to CSV format.

use crate::error::OutlayResult;
use crate::models::ExpenseRecord;
use crate::services::totals_by_category;
use std::io::Write;

/// Export expense records to CSV
pub fn export_expenses_csv<W: Write>(
    records: &[ExpenseRecord],
    writer: &mut W,
) -> OutlayResult<()> {
    // Write header
    writeln!(writer, "Date,Category,Description,Amount")
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    for record in records {
        writeln!(
            writer,
            "{},{},{},{}",
            record.date,
            record.category,
            escape_csv(&record.description),
            record.amount
        )
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export per-category spending totals to CSV
pub fn export_totals_csv<W: Write>(
    records: &[ExpenseRecord],
    writer: &mut W,
) -> OutlayResult<()> {
    // Write header
    writeln!(writer, "Category,Total")
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    for (category, total) in totals_by_category(records) {
        writeln!(writer, "{},{}", category, total)
            .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
