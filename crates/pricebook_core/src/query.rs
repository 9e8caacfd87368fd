//! Search and sort over the in-memory collection.

use pricebook_model::PriceItem;
use std::str::FromStr;
use thiserror::Error;

/// Display ordering for the item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Name, A to Z (case-insensitive).
    NameAsc,
    /// Name, Z to A (case-insensitive).
    NameDesc,
    /// Net price, lowest first.
    PriceAsc,
    /// Net price, highest first.
    PriceDesc,
    /// Creation time, oldest first.
    DateAsc,
    /// Creation time, newest first.
    #[default]
    DateDesc,
}

impl SortOption {
    /// Returns the kebab-case name used by string-facing callers.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::DateAsc => "date-asc",
            SortOption::DateDesc => "date-desc",
        }
    }
}

/// Error parsing a sort option name.
#[derive(Debug, Error)]
#[error("unknown sort option: {0:?}")]
pub struct UnknownSortOption(String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name-asc" => Ok(SortOption::NameAsc),
            "name-desc" => Ok(SortOption::NameDesc),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "date-asc" => Ok(SortOption::DateAsc),
            "date-desc" => Ok(SortOption::DateDesc),
            other => Err(UnknownSortOption(other.to_string())),
        }
    }
}

/// Filters items by case-insensitive substring match on the name.
///
/// An empty or whitespace-only query returns the full collection.
#[must_use]
pub fn search(items: &[PriceItem], query: &str) -> Vec<PriceItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Returns a newly ordered copy of `items`; the input is not mutated.
#[must_use]
pub fn sort(items: &[PriceItem], option: SortOption) -> Vec<PriceItem> {
    let mut sorted = items.to_vec();
    match option {
        SortOption::NameAsc => {
            sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortOption::NameDesc => {
            sorted.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()));
        }
        SortOption::PriceAsc => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOption::PriceDesc => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortOption::DateAsc => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::DateDesc => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    sorted
}
