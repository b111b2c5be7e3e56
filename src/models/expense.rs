//! Expense record model
//!
//! An `ExpenseRecord` is one row of the tracker: date, category, description,
//! amount. Records enter the system through `ExpenseInput`, the raw-string
//! form a UI hands over, and are validated field by field on the way in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OutlayError, OutlayResult};

use super::category::{Category, CategoryFilter, CategoryParseError};
use super::ids::ExpenseId;
use super::money::Money;

/// Date format accepted at the input boundary and written to the document
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense record
///
/// The `id` identifies the record for the lifetime of the session; it is
/// assigned when the record is loaded or added and is not written to the
/// document. Equality compares the four persisted fields only, so two
/// duplicate records compare equal while remaining distinct targets for
/// update and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Session-scoped identity (not persisted)
    #[serde(skip)]
    pub id: ExpenseId,

    /// Day the expense occurred
    pub date: NaiveDate,

    /// One of the fixed categories
    pub category: Category,

    /// Free-form description, never empty
    pub description: String,

    /// Non-negative amount in currency units
    pub amount: Money,
}

impl ExpenseRecord {
    /// Create a record from already-typed fields
    pub fn new(
        date: NaiveDate,
        category: Category,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date,
            category,
            description: description.into(),
            amount,
        }
    }

    /// Validate raw entry strings and build a record with a fresh id
    pub fn from_input(input: &ExpenseInput) -> OutlayResult<Self> {
        let (date, category, description, amount) = validate_input(input)?;
        Ok(Self::new(date, category, description, amount))
    }

    /// Validate raw entry strings and replace this record's fields in place
    ///
    /// The id is untouched, so the record keeps its identity through the
    /// edit. Nothing is modified unless every field validates.
    pub fn apply_input(&mut self, input: &ExpenseInput) -> OutlayResult<()> {
        let (date, category, description, amount) = validate_input(input)?;
        self.date = date;
        self.category = category;
        self.description = description;
        self.amount = amount;
        Ok(())
    }

    /// Whether this record passes the given search criteria
    ///
    /// The keyword is trimmed and matched case-insensitively as a substring
    /// of the description, or literally as a substring of the ISO date
    /// string. An empty keyword matches everything. The category condition
    /// is ANDed on top.
    pub fn matches(&self, keyword: &str, category: CategoryFilter) -> bool {
        if !category.matches(self.category) {
            return false;
        }
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.description.to_lowercase().contains(&needle)
            || self.date.to_string().contains(&needle)
    }
}

impl PartialEq for ExpenseRecord {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.category == other.category
            && self.description == other.description
            && self.amount == other.amount
    }
}

impl Eq for ExpenseRecord {}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.category, self.description, self.amount
        )
    }
}

/// Raw entry strings for one expense, as collected by a UI
///
/// This is the presentation boundary: date, category, description, and
/// amount arrive untyped and are validated together by
/// [`ExpenseRecord::from_input`] or [`ExpenseRecord::apply_input`]. The
/// first invalid field is named in the resulting error; the order checked
/// is date, description, amount, category.
#[derive(Debug, Clone, Default)]
pub struct ExpenseInput {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl ExpenseInput {
    /// Bundle raw entry strings
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            description: description.into(),
            amount: amount.into(),
        }
    }
}

/// Check every field of the input; first failure wins
fn validate_input(
    input: &ExpenseInput,
) -> OutlayResult<(NaiveDate, Category, String, Money)> {
    let date = NaiveDate::parse_from_str(input.date.trim(), DATE_FORMAT)
        .map_err(|_| OutlayError::validation("date", format!("expected YYYY-MM-DD, got {:?}", input.date)))?;

    let description = input.description.trim();
    if description.is_empty() {
        return Err(OutlayError::validation("description", "must not be empty"));
    }

    let amount = Money::parse(&input.amount)
        .map_err(|e| OutlayError::validation("amount", e.to_string()))?;
    if amount.is_negative() {
        return Err(OutlayError::validation("amount", "must not be negative"));
    }

    let category: Category = input
        .category
        .parse()
        .map_err(|e: CategoryParseError| OutlayError::validation("category", e.to_string()))?;

    Ok((date, category, description.to_string(), amount))
}
