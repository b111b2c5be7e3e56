//! Expense book service
//!
//! Provides business logic for expense management: the owned in-memory
//! record list, CRUD mutations that persist eagerly, keyword/category
//! filtering, and the selection that gates update and delete.

use std::collections::HashMap;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{OutlayError, OutlayResult};
use crate::models::{Category, CategoryFilter, ExpenseId, ExpenseInput, ExpenseRecord, Money};
use crate::storage::ExpenseStore;

/// Active search criteria for the filtered view
///
/// The keyword is held trimmed and lowercased; an empty keyword matches
/// every record. The category condition is ANDed with the keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub keyword: String,
    pub category: CategoryFilter,
}

impl SearchCriteria {
    /// Build criteria from a raw keyword and a category condition
    pub fn new(keyword: &str, category: CategoryFilter) -> Self {
        Self {
            keyword: keyword.trim().to_lowercase(),
            category,
        }
    }

    /// Whether these criteria match every record
    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty() && self.category == CategoryFilter::All
    }

    /// Whether a record passes these criteria
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        record.matches(&self.keyword, self.category)
    }
}

/// Owned-state expense book
///
/// Holds the ordered record list loaded from an [`ExpenseStore`], the
/// active search criteria, and the current selection. Every successful
/// mutation persists the whole list back through the store before it
/// returns; on a persist failure the in-memory list is rolled back, so
/// memory and document never drift apart.
///
/// Update and delete operate on the selected record only. Selection is
/// tracked by session id, so two records with identical content remain
/// distinct targets: deleting one of two duplicates removes exactly the
/// chosen one. A successful mutation resets the active criteria; update
/// and delete additionally clear the selection.
#[derive(Debug)]
pub struct ExpenseBook {
    store: ExpenseStore,
    audit: Option<AuditLogger>,
    records: Vec<ExpenseRecord>,
    criteria: SearchCriteria,
    selection: Option<ExpenseId>,
}

impl ExpenseBook {
    /// Open the book, loading all records from the store
    ///
    /// A missing document starts the book empty. Loaded records get fresh
    /// session ids, in document order.
    pub fn open(store: ExpenseStore) -> OutlayResult<Self> {
        let records = store.load()?;
        Ok(Self {
            store,
            audit: None,
            records,
            criteria: SearchCriteria::default(),
            selection: None,
        })
    }

    /// Attach an audit journal; every mutation appends one entry
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// All records, in order
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Number of records in the full list
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the book holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The active search criteria
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Validate raw input, append the record, and persist
    ///
    /// Returns the stored record. On a validation failure nothing changes;
    /// on a persist failure the appended record is rolled back. A
    /// successful add resets the active criteria and leaves any selection
    /// in place.
    pub fn add(&mut self, input: &ExpenseInput) -> OutlayResult<ExpenseRecord> {
        let record = ExpenseRecord::from_input(input)?;

        self.records.push(record.clone());
        if let Err(e) = self.store.save(&self.records) {
            self.records.pop();
            return Err(e);
        }

        self.criteria = SearchCriteria::default();
        self.log_audit(AuditEntry::add(&record))?;
        Ok(record)
    }

    /// Select the record with the given id, making it the update/delete target
    pub fn select(&mut self, id: ExpenseId) -> OutlayResult<&ExpenseRecord> {
        let index = self
            .index_of(id)
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;
        self.selection = Some(id);
        Ok(&self.records[index])
    }

    /// Drop the current selection, if any
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The currently selected record, if a selection is active
    pub fn selected(&self) -> Option<&ExpenseRecord> {
        let id = self.selection?;
        self.records.iter().find(|r| r.id == id)
    }

    /// Validate raw input and replace the selected record's fields
    ///
    /// The record keeps its id and its position in the list. Requires an
    /// active selection. On success the criteria are reset and the
    /// selection is cleared; on a validation or persist failure the
    /// selection stays active. A journal write failure surfaces after the
    /// change is already applied and persisted.
    pub fn update_selected(&mut self, input: &ExpenseInput) -> OutlayResult<ExpenseRecord> {
        let id = self.selection.ok_or_else(OutlayError::nothing_selected)?;
        let index = self
            .index_of(id)
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        let before = self.records[index].clone();
        self.records[index].apply_input(input)?;

        if let Err(e) = self.store.save(&self.records) {
            self.records[index] = before;
            return Err(e);
        }

        let after = self.records[index].clone();
        self.criteria = SearchCriteria::default();
        self.selection = None;
        self.log_audit(AuditEntry::update(&before, &after))?;
        Ok(after)
    }

    /// Remove the selected record and persist
    ///
    /// Returns the removed record. Requires an active selection. On
    /// success the criteria are reset and the selection is cleared; on a
    /// persist failure the record is restored at its original position.
    pub fn delete_selected(&mut self) -> OutlayResult<ExpenseRecord> {
        let id = self.selection.ok_or_else(OutlayError::nothing_selected)?;
        let index = self
            .index_of(id)
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        let removed = self.records.remove(index);
        if let Err(e) = self.store.save(&self.records) {
            self.records.insert(index, removed);
            return Err(e);
        }

        self.criteria = SearchCriteria::default();
        self.selection = None;
        self.log_audit(AuditEntry::delete(&removed))?;
        Ok(removed)
    }

    /// Set the active criteria and return the recomputed view
    ///
    /// The underlying list is not touched; narrowing the view never loses
    /// records.
    pub fn filter(&mut self, keyword: &str, category: CategoryFilter) -> Vec<ExpenseRecord> {
        self.criteria = SearchCriteria::new(keyword, category);
        self.view()
    }

    /// Clear the active criteria and return the full list
    pub fn reset(&mut self) -> Vec<ExpenseRecord> {
        self.criteria = SearchCriteria::default();
        self.records.clone()
    }

    /// Recompute the filtered view for the current criteria
    ///
    /// Always derived fresh from the record list, in list order.
    pub fn view(&self) -> Vec<ExpenseRecord> {
        if self.criteria.is_empty() {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|r| self.criteria.matches(r))
            .cloned()
            .collect()
    }

    fn index_of(&self, id: ExpenseId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn log_audit(&self, entry: AuditEntry) -> OutlayResult<()> {
        if let Some(logger) = &self.audit {
            logger.log(&entry)?;
        }
        Ok(())
    }
}

/// Sum the amounts of any record sequence
pub fn total<'a, I>(records: I) -> Money
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records.into_iter().map(|r| r.amount).sum()
}

/// Roll up spending per category, in category order
///
/// Categories with no records are omitted.
pub fn totals_by_category<'a, I>(records: I) -> Vec<(Category, Money)>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut totals: HashMap<Category, Money> = HashMap::new();
    for record in records {
        *totals.entry(record.category).or_insert(Money::zero()) += record.amount;
    }

    Category::ALL
        .iter()
        .filter_map(|&category| totals.get(&category).map(|&sum| (category, sum)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn lunch() -> ExpenseInput {
        ExpenseInput::new("2024-01-01", "Food", "lunch", "100.00")
    }

    fn bus() -> ExpenseInput {
        ExpenseInput::new("2024-01-02", "Transport", "bus ticket", "20.00")
    }

    fn dinner() -> ExpenseInput {
        ExpenseInput::new("2024-02-01", "Food", "dinner", "50.00")
    }

    fn create_test_book() -> (TempDir, ExpenseBook) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"));
        let book = ExpenseBook::open(store).unwrap();
        (temp_dir, book)
    }

    fn seeded_book() -> (TempDir, ExpenseBook) {
        let (temp_dir, mut book) = create_test_book();
        book.add(&lunch()).unwrap();
        book.add(&bus()).unwrap();
        (temp_dir, book)
    }

    fn document_path(book: &ExpenseBook) -> PathBuf {
        book.store.path().to_path_buf()
    }

    /// Make the next save fail by blocking the temp file slot
    fn block_saves(book: &ExpenseBook) {
        fs::create_dir(document_path(book).with_extension("json.tmp")).unwrap();
    }

    fn reopen(book: &ExpenseBook) -> ExpenseBook {
        ExpenseBook::open(ExpenseStore::new(document_path(book))).unwrap()
    }

    #[test]
    fn test_open_missing_document_starts_empty() {
        let (_temp_dir, book) = create_test_book();
        assert!(book.is_empty());
        assert!(book.view().is_empty());
    }

    #[test]
    fn test_open_malformed_document_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        fs::write(&path, "not an expense document").unwrap();

        let err = ExpenseBook::open(ExpenseStore::new(path)).unwrap_err();
        assert!(matches!(err, OutlayError::MalformedDocument(_)));
    }

    #[test]
    fn test_add_appends_and_persists() {
        let (_temp_dir, mut book) = seeded_book();

        let record = book.add(&dinner()).unwrap();
        assert_eq!(book.len(), 3);
        assert_eq!(book.records()[2], record);
        assert_eq!(book.records()[2].description, "dinner");

        let reloaded = reopen(&book);
        assert_eq!(reloaded.records(), book.records());
    }

    #[test]
    fn test_add_invalid_input_changes_nothing() {
        let (_temp_dir, mut book) = seeded_book();

        let mut input = dinner();
        input.description = "  ".into();
        let err = book.add(&input).unwrap_err();

        assert_eq!(err.invalid_field(), Some("description"));
        assert_eq!(book.len(), 2);
        assert_eq!(reopen(&book).len(), 2);
    }

    #[test]
    fn test_filter_by_keyword() {
        let (_temp_dir, mut book) = seeded_book();

        let view = book.filter("lunch", CategoryFilter::All);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].description, "lunch");

        // Case-insensitive, whitespace trimmed
        let view = book.filter("  LUNCH ", CategoryFilter::All);
        assert_eq!(view.len(), 1);

        // Keyword also matches the date string
        let view = book.filter("2024-01-02", CategoryFilter::All);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].description, "bus ticket");
    }

    #[test]
    fn test_filter_by_category() {
        let (_temp_dir, mut book) = seeded_book();

        let view = book.filter("", CategoryFilter::Only(Category::Transport));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].description, "bus ticket");

        let view = book.filter("", CategoryFilter::All);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_filter_conditions_are_anded() {
        let (_temp_dir, mut book) = seeded_book();

        assert!(book.filter("lunch", CategoryFilter::Only(Category::Transport)).is_empty());

        // "u" appears in both descriptions; category narrows it
        let view = book.filter("u", CategoryFilter::Only(Category::Food));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].description, "lunch");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let (_temp_dir, mut book) = seeded_book();
        book.add(&dinner()).unwrap();

        let once = book.filter("n", CategoryFilter::Only(Category::Food));
        let twice: Vec<_> = once
            .iter()
            .filter(|r| r.matches("n", CategoryFilter::Only(Category::Food)))
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_does_not_mutate_the_list() {
        let (_temp_dir, mut book) = seeded_book();

        book.filter("lunch", CategoryFilter::All);
        assert_eq!(book.len(), 2);

        let full = book.reset();
        assert_eq!(full.len(), 2);
        assert_eq!(full[0].description, "lunch");
        assert_eq!(full[1].description, "bus ticket");
    }

    #[test]
    fn test_view_tracks_current_criteria() {
        let (_temp_dir, mut book) = seeded_book();

        assert_eq!(book.view().len(), 2);
        book.filter("lunch", CategoryFilter::All);
        assert_eq!(book.view().len(), 1);
        book.reset();
        assert_eq!(book.view().len(), 2);
    }

    #[test]
    fn test_mutation_resets_criteria() {
        let (_temp_dir, mut book) = seeded_book();

        book.filter("lunch", CategoryFilter::All);
        assert_eq!(book.view().len(), 1);

        book.add(&dinner()).unwrap();
        assert!(book.criteria().is_empty());
        assert_eq!(book.view().len(), 3);
    }

    #[test]
    fn test_total_over_full_list() {
        let (_temp_dir, mut book) = seeded_book();
        book.add(&dinner()).unwrap();

        assert_eq!(total(book.records()), Money::from_cents(17000));
    }

    #[test]
    fn test_total_over_filtered_view() {
        let (_temp_dir, mut book) = seeded_book();
        book.add(&dinner()).unwrap();

        let view = book.filter("", CategoryFilter::Only(Category::Food));
        assert_eq!(total(&view), Money::from_cents(15000));
    }

    #[test]
    fn test_totals_by_category() {
        let (_temp_dir, mut book) = seeded_book();
        book.add(&dinner()).unwrap();

        let totals = totals_by_category(book.records());
        assert_eq!(
            totals,
            vec![
                (Category::Food, Money::from_cents(15000)),
                (Category::Transport, Money::from_cents(2000)),
            ]
        );
    }

    #[test]
    fn test_select_then_update() {
        let (_temp_dir, mut book) = seeded_book();
        let id = book.records()[1].id;

        let selected = book.select(id).unwrap();
        assert_eq!(selected.description, "bus ticket");

        let input = ExpenseInput::new("2024-01-02", "Transport", "train ticket", "35.00");
        let updated = book.update_selected(&input).unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.description, "train ticket");
        assert_eq!(book.records()[1], updated);
        assert_eq!(book.len(), 2);

        // Selection cleared, criteria reset, change persisted
        assert!(book.selected().is_none());
        assert!(book.criteria().is_empty());
        assert_eq!(reopen(&book).records()[1].description, "train ticket");
    }

    #[test]
    fn test_update_without_selection_is_not_found() {
        let (_temp_dir, mut book) = seeded_book();

        let err = book.update_selected(&dinner()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(book.len(), 2);
        assert_eq!(book.records()[0].description, "lunch");
    }

    #[test]
    fn test_update_validation_failure_keeps_selection() {
        let (_temp_dir, mut book) = seeded_book();
        let id = book.records()[0].id;
        book.select(id).unwrap();

        let input = ExpenseInput::new("2024-01-01", "Food", "lunch", "not a number");
        let err = book.update_selected(&input).unwrap_err();

        assert_eq!(err.invalid_field(), Some("amount"));
        assert_eq!(book.records()[0].amount, Money::from_cents(10000));
        assert_eq!(book.selected().unwrap().id, id);
    }

    #[test]
    fn test_select_then_delete() {
        let (_temp_dir, mut book) = seeded_book();
        let id = book.records()[0].id;

        book.select(id).unwrap();
        let removed = book.delete_selected().unwrap();

        assert_eq!(removed.description, "lunch");
        assert_eq!(book.len(), 1);
        assert_eq!(book.records()[0].description, "bus ticket");
        assert!(book.selected().is_none());
        assert_eq!(reopen(&book).len(), 1);
    }

    #[test]
    fn test_delete_without_selection_is_not_found() {
        let (_temp_dir, mut book) = seeded_book();

        let err = book.delete_selected().unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_select_unknown_id_is_not_found() {
        let (_temp_dir, mut book) = seeded_book();

        let err = book.select(ExpenseId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert!(book.selected().is_none());
    }

    #[test]
    fn test_clear_selection() {
        let (_temp_dir, mut book) = seeded_book();
        let id = book.records()[0].id;

        book.select(id).unwrap();
        assert!(book.selected().is_some());

        book.clear_selection();
        assert!(book.selected().is_none());
        assert!(book.delete_selected().is_err());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_selection_survives_add() {
        let (_temp_dir, mut book) = seeded_book();
        let id = book.records()[0].id;
        book.select(id).unwrap();

        book.add(&dinner()).unwrap();
        assert_eq!(book.selected().unwrap().id, id);
    }

    #[test]
    fn test_duplicates_are_distinct_targets() {
        let (_temp_dir, mut book) = create_test_book();
        let first = book.add(&lunch()).unwrap();
        let second = book.add(&lunch()).unwrap();

        assert_eq!(first, second);
        assert_ne!(first.id, second.id);

        book.select(second.id).unwrap();
        let removed = book.delete_selected().unwrap();

        assert_eq!(removed.id, second.id);
        assert_eq!(book.len(), 1);
        assert_eq!(book.records()[0].id, first.id);
    }

    #[test]
    fn test_add_rolls_back_on_save_failure() {
        let (_temp_dir, mut book) = seeded_book();
        block_saves(&book);

        let err = book.add(&dinner()).unwrap_err();
        assert!(matches!(err, OutlayError::Io(_)));
        assert_eq!(book.len(), 2);
        assert!(book.records().iter().all(|r| r.description != "dinner"));
    }

    #[test]
    fn test_update_rolls_back_on_save_failure() {
        let (_temp_dir, mut book) = seeded_book();
        let id = book.records()[0].id;
        book.select(id).unwrap();
        block_saves(&book);

        let input = ExpenseInput::new("2024-01-01", "Food", "brunch", "80.00");
        let err = book.update_selected(&input).unwrap_err();

        assert!(matches!(err, OutlayError::Io(_)));
        assert_eq!(book.records()[0].description, "lunch");
        assert_eq!(book.records()[0].amount, Money::from_cents(10000));
        assert_eq!(book.selected().unwrap().id, id);
    }

    #[test]
    fn test_delete_rolls_back_on_save_failure() {
        let (_temp_dir, mut book) = seeded_book();
        let id = book.records()[0].id;
        book.select(id).unwrap();
        block_saves(&book);

        let err = book.delete_selected().unwrap_err();

        assert!(matches!(err, OutlayError::Io(_)));
        assert_eq!(book.len(), 2);
        assert_eq!(book.records()[0].description, "lunch");
        assert_eq!(book.selected().unwrap().id, id);
    }

    #[test]
    fn test_update_applies_even_when_audit_write_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"));
        let mut book = ExpenseBook::open(store).unwrap();
        book.add(&lunch()).unwrap();
        let id = book.records()[0].id;

        // A directory at the journal path makes the append fail after the
        // document save has already succeeded
        fs::create_dir(temp_dir.path().join("audit.log")).unwrap();
        let mut book = book.with_audit(AuditLogger::new(temp_dir.path().join("audit.log")));

        book.select(id).unwrap();
        let input = ExpenseInput::new("2024-01-01", "Food", "brunch", "80.00");
        let err = book.update_selected(&input).unwrap_err();

        assert!(matches!(err, OutlayError::Io(_)));
        assert_eq!(book.records()[0].description, "brunch");
        assert_eq!(reopen(&book).records()[0].description, "brunch");
        assert!(book.selected().is_none());
        assert!(book.criteria().is_empty());
    }

    #[test]
    fn test_mutations_are_journaled() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"));
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut book = ExpenseBook::open(store).unwrap().with_audit(logger);

        let record = book.add(&lunch()).unwrap();

        book.select(record.id).unwrap();
        let input = ExpenseInput::new("2024-01-01", "Food", "lunch", "110.00");
        book.update_selected(&input).unwrap();

        let id = book.records()[0].id;
        book.select(id).unwrap();
        book.delete_selected().unwrap();

        let journal = AuditLogger::new(temp_dir.path().join("audit.log"));
        let entries = journal.read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].operation, crate::audit::Operation::Add);
        assert_eq!(entries[1].operation, crate::audit::Operation::Update);
        assert_eq!(entries[2].operation, crate::audit::Operation::Delete);
        assert_eq!(
            entries[1].summary.as_deref(),
            Some("amount: 100.00 -> 110.00")
        );
    }

    #[test]
    fn test_totals_by_category_empty() {
        assert!(totals_by_category(&[]).is_empty());
        assert!(total(&[]).is_zero());
    }
}
