//! Domain layer for foodlens.
//!
//! Holds the catalog record types and the crate error type, independent of
//! HTTP, terminal or storage concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`product`]: Product and category records, field resolvers

pub mod error;
pub mod product;

pub use error::{FoodlensError, Result};
pub use product::{normalize_grade, CategorySummary, ProductRecord};
