//! URL construction for the five catalog endpoints.
//!
//! Query terms and path segments are percent-encoded here and nowhere else.

/// Default catalog host.
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Builds request URLs against a catalog base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Creates an endpoint builder. A trailing slash on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Unfiltered catalog page.
    #[must_use]
    pub fn listing(&self, page: u32, page_size: u32) -> String {
        format!(
            "{}/cgi/search.pl?search_simple=1&action=process&page={page}&page_size={page_size}&json=true",
            self.base_url
        )
    }

    /// Free-text search page.
    #[must_use]
    pub fn search(&self, term: &str, page: u32, page_size: u32) -> String {
        format!(
            "{}/cgi/search.pl?search_terms={}&page={page}&page_size={page_size}&json=true",
            self.base_url,
            urlencoding::encode(term)
        )
    }

    /// Single product by barcode.
    #[must_use]
    pub fn barcode(&self, code: &str) -> String {
        format!("{}/api/v0/product/{}.json", self.base_url, urlencoding::encode(code))
    }

    /// Products filed under one category.
    #[must_use]
    pub fn category(&self, category_id: &str, page: u32, page_size: u32) -> String {
        format!(
            "{}/category/{}/{page}.json?page_size={page_size}",
            self.base_url,
            urlencoding::encode(category_id)
        )
    }

    /// Category index.
    #[must_use]
    pub fn categories(&self) -> String {
        format!("{}/categories.json", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_terms_are_escaped() {
        let endpoints = Endpoints::new("http://localhost:8080/");
        assert_eq!(
            endpoints.search("dark chocolate & nuts", 2, 24),
            "http://localhost:8080/cgi/search.pl?search_terms=dark%20chocolate%20%26%20nuts&page=2&page_size=24&json=true"
        );
    }

    #[test]
    fn listing_and_index_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.listing(1, 24),
            "https://world.openfoodfacts.org/cgi/search.pl?search_simple=1&action=process&page=1&page_size=24&json=true"
        );
        assert_eq!(endpoints.categories(), "https://world.openfoodfacts.org/categories.json");
    }

    #[test]
    fn path_segments_are_escaped() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.category("en:breakfast cereals", 3, 24),
            "https://world.openfoodfacts.org/category/en%3Abreakfast%20cereals/3.json?page_size=24"
        );
        assert_eq!(
            endpoints.barcode("737628064502"),
            "https://world.openfoodfacts.org/api/v0/product/737628064502.json"
        );
    }
}
