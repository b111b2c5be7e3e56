//! YAML Export functionality
//!
//! Exports the expense list to YAML format for human-readable backup.

use crate::error::OutlayResult;
use crate::export::json::FullExport;
use crate::models::ExpenseRecord;
use std::io::Write;

/// Export the expense list to YAML format
pub fn export_full_yaml<W: Write>(records: &[ExpenseRecord], writer: &mut W) -> OutlayResult<()> {
    let export = FullExport::from_records(records);

    // Add a header comment
    writeln!(writer, "# outlay expense export")
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    writeln!(writer, "#").map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    writeln!(writer, "# This file can be used to restore your expense data.")
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    // Serialize to YAML
    serde_yaml::to_writer(writer, &export)
        .map_err(|e| crate::error::OutlayError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> OutlayResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml_str)
        .map_err(|e| crate::error::OutlayError::Import(e.to_string()))?;

    // Validate the import
    export
        .validate()
        .map_err(crate::error::OutlayError::Import)?;

    Ok(export)
}
