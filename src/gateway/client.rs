//! HTTP implementation of the catalog backend.

use super::backend::Catalog;
use super::endpoints::{Endpoints, DEFAULT_BASE_URL};
use super::shaping::shape_categories;
use super::wire;
use crate::domain::error::{FoodlensError, Result};
use crate::domain::product::{CategorySummary, ProductRecord};
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default `User-Agent`. The catalog asks clients to identify themselves.
pub const DEFAULT_USER_AGENT: &str = concat!("foodlens/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`CatalogClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    /// Upper bound for one request, connect through body. Expiry is a transport error.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Catalog client over HTTP.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl CatalogClient {
    /// Builds a client with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`FoodlensError::Config`] if the HTTP client cannot be built
    /// (for example, an invalid `User-Agent` value).
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| FoodlensError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(&settings.base_url),
        })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Performs one GET and returns the body of a successful response.
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url = %url, "catalog request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "catalog returned error status");
            return Err(FoodlensError::Transport(format!("HTTP {status} from {url}")));
        }

        let body = response.bytes().await?;
        tracing::debug!(url = %url, bytes = body.len(), "catalog response received");
        Ok(body.to_vec())
    }
}

impl Catalog for CatalogClient {
    async fn fetch_listing(&self, page: u32, page_size: u32) -> Result<Vec<ProductRecord>> {
        let body = self.get(&self.endpoints.listing(page, page_size)).await?;
        wire::decode_product_page(&body)
    }

    async fn search_by_name(&self, term: &str, page: u32, page_size: u32) -> Result<Vec<ProductRecord>> {
        let body = self.get(&self.endpoints.search(term, page, page_size)).await?;
        wire::decode_product_page(&body)
    }

    async fn fetch_by_barcode(&self, code: &str) -> Result<ProductRecord> {
        let body = self.get(&self.endpoints.barcode(code)).await?;
        wire::decode_barcode(&body, code)
    }

    async fn fetch_by_category(&self, category_id: &str, page: u32, page_size: u32) -> Result<Vec<ProductRecord>> {
        let body = self.get(&self.endpoints.category(category_id, page, page_size)).await?;
        wire::decode_product_page(&body)
    }

    async fn fetch_categories(&self) -> Result<Vec<CategorySummary>> {
        let body = self.get(&self.endpoints.categories()).await?;
        let categories = wire::decode_category_index(&body)?;
        let total = categories.len();
        let shaped = shape_categories(categories);
        tracing::debug!(total = total, kept = shaped.len(), "category index shaped");
        Ok(shaped)
    }
}
