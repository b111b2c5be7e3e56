//! Expense categories
//!
//! The category set is fixed: every record carries exactly one of the six
//! categories below, and the persisted document stores the canonical name.
//! `CategoryFilter` is the search-side selector, where "All" switches the
//! category condition off.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Shopping,
    Entertainment,
    Other,
}

impl Category {
    /// All categories, in display order (useful for populating pickers)
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Shopping,
        Category::Entertainment,
        Category::Other,
    ];

    /// The canonical name, as stored in the document
    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Parse a category name. Matching is case-insensitive; the document
    /// itself always holds the canonical capitalized form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "utilities" => Ok(Category::Utilities),
            "shopping" => Ok(Category::Shopping),
            "entertainment" => Ok(Category::Entertainment),
            "other" => Ok(Category::Other),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {:?}", self.0)
    }
}

impl std::error::Error for CategoryParseError {}

/// Category condition for filtering: a specific category, or no condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Match every category
    #[default]
    All,
    /// Match exactly one category
    Only(Category),
}

impl CategoryFilter {
    /// Whether a record with the given category passes this filter
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Ok(CategoryFilter::Only(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_canonical_names() {
        assert_eq!(Category::Food.to_string(), "Food");
        assert_eq!(Category::Entertainment.to_string(), "Entertainment");
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("transport".parse::<Category>().unwrap(), Category::Transport);
        assert_eq!(" UTILITIES ".parse::<Category>().unwrap(), Category::Utilities);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "Groceries".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: \"Groceries\"");
        // "All" is a filter value, not a category
        assert!("All".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_exact_names() {
        assert_eq!(serde_json::to_string(&Category::Shopping).unwrap(), "\"Shopping\"");
        let c: Category = serde_json::from_str("\"Food\"").unwrap();
        assert_eq!(c, Category::Food);
        // The document format is strict about capitalization
        assert!(serde_json::from_str::<Category>("\"food\"").is_err());
    }

    #[test]
    fn test_all_lists_every_category() {
        assert_eq!(Category::ALL.len(), 6);
        assert_eq!(Category::ALL[0], Category::Food);
        assert_eq!(Category::ALL[5], Category::Other);
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Food));
        assert!(CategoryFilter::All.matches(Category::Other));
        assert!(CategoryFilter::Only(Category::Food).matches(Category::Food));
        assert!(!CategoryFilter::Only(Category::Food).matches(Category::Transport));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Transport".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Transport)
        );
        assert!("Candy".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_default_is_all() {
        assert_eq!(CategoryFilter::default(), CategoryFilter::All);
    }
}
