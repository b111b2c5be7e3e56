//! outlay - Personal expense tracking core
//!
//! This library provides the core functionality for a local expense tracker:
//! an expense book persisted as a flat JSON document, with validation,
//! keyword/category filtering, totals, an audit journal of mutations, and
//! data export.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (records, categories, money, ids)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (the expense book)
//! - `audit`: Audit journal of mutations
//! - `export`: CSV/JSON/YAML data export
//!
//! # Example
//!
//! ```rust,ignore
//! use outlay::models::{CategoryFilter, ExpenseInput};
//! use outlay::services::ExpenseBook;
//! use outlay::storage::ExpenseStore;
//!
//! let mut book = ExpenseBook::open(ExpenseStore::new("expenses.json"))?;
//!
//! let record = book.add(&ExpenseInput::new("2024-01-01", "Food", "lunch", "12.50"))?;
//! let food = book.filter("", CategoryFilter::Only(record.category));
//!
//! book.select(record.id)?;
//! book.delete_selected()?;
//! ```

pub mod audit;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{OutlayError, OutlayResult};
pub use models::{Category, CategoryFilter, ExpenseId, ExpenseInput, ExpenseRecord, Money};
pub use services::{total, totals_by_category, ExpenseBook};
pub use storage::ExpenseStore;
