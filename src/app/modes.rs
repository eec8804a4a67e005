//! Query mode and fetch purpose types.
//!
//! Exactly one query mode is active at a time. The mode and its parameter
//! live in a single enum so a search term and a category can never be set
//! together.

use std::fmt;

/// The active query and its parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Query {
    /// Default, unfiltered catalog listing.
    #[default]
    Listing,
    /// Free-text name search.
    NameSearch(String),
    /// Single-record barcode lookup.
    Barcode(String),
    /// Products within one category.
    Category(String),
}

impl Query {
    #[must_use]
    pub const fn mode(&self) -> QueryMode {
        match self {
            Self::Listing => QueryMode::Listing,
            Self::NameSearch(_) => QueryMode::NameSearch,
            Self::Barcode(_) => QueryMode::Barcode,
            Self::Category(_) => QueryMode::Category,
        }
    }

    /// Search term, barcode or category identifier; `None` for the listing.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::Listing => None,
            Self::NameSearch(value) | Self::Barcode(value) | Self::Category(value) => Some(value),
        }
    }

    /// Whether further pages exist for this kind of query at all.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        !matches!(self, Self::Barcode(_))
    }

    /// Message shown when the page-1 fetch for this query fails.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::Listing => LISTING_FAILED,
            Self::NameSearch(_) => SEARCH_FAILED,
            Self::Barcode(_) => BARCODE_NOT_FOUND,
            Self::Category(_) => CATEGORY_FAILED,
        }
    }
}

/// Discriminant of [`Query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Listing,
    NameSearch,
    Barcode,
    Category,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Listing => "listing",
            Self::NameSearch => "name-search",
            Self::Barcode => "barcode",
            Self::Category => "category",
        })
    }
}

/// Why a result-set fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    /// First page of a new query (or the barcode lookup).
    Initial,
    /// Next page of the current query.
    LoadMore { page: u32 },
}

pub const LISTING_FAILED: &str =
    "Failed to load products. The server might be temporarily unavailable. Please try again later.";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const CATEGORY_FAILED: &str = "Failed to load category products. Please try again.";
pub const LOAD_MORE_FAILED: &str = "Failed to load more products. Please try again.";
pub const BARCODE_NOT_FOUND: &str = "Product not found. Please check the barcode and try again.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_parameter_per_mode() {
        assert_eq!(Query::Listing.parameter(), None);
        assert_eq!(Query::Category("en:teas".into()).parameter(), Some("en:teas"));
        assert_eq!(Query::NameSearch("tea".into()).mode(), QueryMode::NameSearch);
    }

    #[test]
    fn barcode_is_never_paginated() {
        assert!(!Query::Barcode("123".into()).is_paginated());
        assert!(Query::Listing.is_paginated());
        assert_eq!(Query::Barcode("123".into()).failure_message(), BARCODE_NOT_FOUND);
    }
}
