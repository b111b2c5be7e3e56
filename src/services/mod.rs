//! Service layer for outlay
//!
//! The service layer provides business logic on top of the storage layer:
//! the expense book with validation, filtering, selection, and totals.

pub mod expenses;

pub use expenses::{total, totals_by_category, ExpenseBook, SearchCriteria};
