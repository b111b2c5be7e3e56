//! Audit journal for expense mutations
//!
//! Records every add, update, delete of an expense record with before/after
//! snapshots in an append-only journal.
//!
//! # Architecture
//!
//! The audit system consists of two components:
//!
//! - `AuditEntry`: Represents a single journal entry with timestamp,
//!   operation, affected record id, and optional before/after snapshots.
//! - `AuditLogger`: Handles writing entries to the journal file using a
//!   line-delimited JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use outlay::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(journal_path);
//!
//! // Journal a new record
//! logger.log(&AuditEntry::add(&record))?;
//!
//! // Journal an edit; the diff summary is derived from the two versions
//! logger.log(&AuditEntry::update(&before, &after))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
