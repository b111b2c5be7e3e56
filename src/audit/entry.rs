//! Audit entry data structures
//!
//! Defines the structure of audit journal entries: the operation kind and
//! the entry format itself, with before/after snapshots of the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ExpenseRecord;

/// Kinds of mutation that are journaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record was added
    Add,
    /// Record was updated
    Update,
    /// Record was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "ADD"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit journal entry
///
/// Records one mutation of an expense record, with before/after snapshots
/// for tracking changes. Snapshots hold the persisted fields only, so the
/// journal stays readable regardless of session ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the mutation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Kind of mutation performed
    pub operation: Operation,

    /// Session id of the affected record
    pub expense_id: String,

    /// Human-readable summary (record display, or a field diff for updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Snapshot of the record before the mutation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Snapshot of the record after the mutation (adds/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a newly added record
    pub fn add(record: &ExpenseRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Add,
            expense_id: record.id.to_string(),
            summary: Some(record.to_string()),
            before: None,
            after: serde_json::to_value(record).ok(),
        }
    }

    /// Entry for an updated record, with a field-by-field diff summary
    pub fn update(before: &ExpenseRecord, after: &ExpenseRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            expense_id: after.id.to_string(),
            summary: diff_summary(before, after),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
        }
    }

    /// Entry for a deleted record
    pub fn delete(record: &ExpenseRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            expense_id: record.id.to_string(),
            summary: Some(record.to_string()),
            before: serde_json::to_value(record).ok(),
            after: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id
        );

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  {}", summary));
        }

        output
    }
}

/// Describe what changed between two versions of a record
fn diff_summary(before: &ExpenseRecord, after: &ExpenseRecord) -> Option<String> {
    let mut changes = Vec::new();

    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.description != after.description {
        changes.push(format!(
            "description: '{}' -> '{}'",
            before.description, after.description
        ));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}
