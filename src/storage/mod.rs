//! Persistence layer for the expense document

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseStore;
