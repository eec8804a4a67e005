//! Catalog backend abstraction.
//!
//! The [`Catalog`] trait is the seam between the fetch worker and the HTTP
//! client. Each method maps to one read operation of the catalog service and
//! performs exactly one request/response round trip.

use crate::domain::error::Result;
use crate::domain::product::{CategorySummary, ProductRecord};
use std::future::Future;

/// Read-only access to the product catalog.
///
/// # Implementations
///
/// - [`CatalogClient`](super::CatalogClient): HTTP client for the public catalog
///
/// # Errors
///
/// Every method fails with [`FoodlensError::Transport`] on network failure,
/// timeout or non-success status, and with [`FoodlensError::Decode`] when the
/// payload is not the expected shape. [`Catalog::fetch_by_barcode`] also fails
/// with [`FoodlensError::NotFound`].
///
/// [`FoodlensError::Transport`]: crate::FoodlensError::Transport
/// [`FoodlensError::Decode`]: crate::FoodlensError::Decode
/// [`FoodlensError::NotFound`]: crate::FoodlensError::NotFound
pub trait Catalog: Send + Sync {
    /// Default, unfiltered catalog page.
    fn fetch_listing(
        &self,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<ProductRecord>>> + Send;

    /// Free-text search. Callers are responsible for not sending blank terms.
    fn search_by_name(
        &self,
        term: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<ProductRecord>>> + Send;

    /// Single record by barcode.
    fn fetch_by_barcode(&self, code: &str) -> impl Future<Output = Result<ProductRecord>> + Send;

    /// Products within one category.
    fn fetch_by_category(
        &self,
        category_id: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<ProductRecord>>> + Send;

    /// Category index, already shaped by [`shape_categories`](super::shape_categories).
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<CategorySummary>>> + Send;
}
