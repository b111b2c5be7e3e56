//! Export module for outlay
//!
//! Provides expense data export functionality in multiple formats:
//! - CSV: For expense rows and category totals (spreadsheet-compatible)
//! - JSON: For machine-readable full export
//! - YAML: For human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_expenses_csv, export_totals_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
