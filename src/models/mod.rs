//! Core domain models

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, CategoryFilter, CategoryParseError};
pub use expense::{ExpenseInput, ExpenseRecord, DATE_FORMAT};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
