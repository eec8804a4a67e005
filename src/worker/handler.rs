//! Fetch worker: executes catalog requests off the coordinator's task.
//!
//! The worker performs exactly one catalog round trip per request and reports
//! the outcome tagged with the request's ticket. It never touches session
//! state; deciding whether a completion is still wanted is the coordinator's
//! job.

use crate::domain::error::Result;
use crate::gateway::Catalog;
use crate::worker::messages::{CatalogQuery, FetchOutcome, FetchRequest, FetchResponse};
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Executes [`FetchRequest`]s against a catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogWorker<C> {
    catalog: C,
}

impl<C: Catalog> CatalogWorker<C> {
    pub const fn new(catalog: C) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Runs one request and returns its completion.
    ///
    /// The fetch span is parented to the span that issued the request when
    /// the request carries a trace context.
    pub async fn execute(&self, request: FetchRequest) -> FetchResponse {
        let FetchRequest {
            ticket,
            query,
            trace_context,
        } = request;

        let span = tracing::debug_span!("worker_fetch", ticket = ticket, operation = query.operation());
        if let Some(parent) = trace_context.as_ref().and_then(|tc| tc.to_otel_context()) {
            span.set_parent(parent);
        }

        let outcome = self.run(query).instrument(span).await;
        FetchResponse::new(ticket, outcome)
    }

    async fn run(&self, query: CatalogQuery) -> FetchOutcome {
        let operation = query.operation();
        let result = match query {
            CatalogQuery::Listing { page, page_size } => self
                .catalog
                .fetch_listing(page, page_size)
                .await
                .map(FetchOutcome::Products),
            CatalogQuery::NameSearch { term, page, page_size } => self
                .catalog
                .search_by_name(&term, page, page_size)
                .await
                .map(FetchOutcome::Products),
            CatalogQuery::Barcode { code } => self
                .catalog
                .fetch_by_barcode(&code)
                .await
                .map(FetchOutcome::Product),
            CatalogQuery::Category {
                category_id,
                page,
                page_size,
            } => self
                .catalog
                .fetch_by_category(&category_id, page, page_size)
                .await
                .map(FetchOutcome::Products),
            CatalogQuery::Categories => self
                .catalog
                .fetch_categories()
                .await
                .map(FetchOutcome::Categories),
        };

        Self::handle_result(operation, result)
    }

    /// Logs the result of an operation and folds errors into the outcome.
    fn handle_result(operation: &str, result: Result<FetchOutcome>) -> FetchOutcome {
        match result {
            Ok(outcome) => {
                tracing::debug!(operation = operation, "catalog operation successful");
                outcome
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "catalog operation failed");
                FetchOutcome::Failed(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::FoodlensError;
    use crate::domain::product::{CategorySummary, ProductRecord};
    use crate::worker::messages::FailureKind;

    /// Catalog returning canned data; barcode `000` is a miss.
    struct FakeCatalog;

    fn record(code: &str) -> ProductRecord {
        ProductRecord {
            code: Some(code.to_string()),
            name: Some(format!("Product {code}")),
            ..Default::default()
        }
    }

    impl Catalog for FakeCatalog {
        async fn fetch_listing(&self, page: u32, page_size: u32) -> Result<Vec<ProductRecord>> {
            Ok((0..page_size).map(|i| record(&format!("{page}-{i}"))).collect())
        }

        async fn search_by_name(&self, term: &str, _page: u32, _page_size: u32) -> Result<Vec<ProductRecord>> {
            Err(FoodlensError::Transport(format!("search for {term} refused")))
        }

        async fn fetch_by_barcode(&self, code: &str) -> Result<ProductRecord> {
            if code == "000" {
                Err(FoodlensError::NotFound(code.to_string()))
            } else {
                Ok(record(code))
            }
        }

        async fn fetch_by_category(&self, _category_id: &str, _page: u32, _page_size: u32) -> Result<Vec<ProductRecord>> {
            Err(FoodlensError::Decode("missing products".to_string()))
        }

        async fn fetch_categories(&self) -> Result<Vec<CategorySummary>> {
            Ok(vec![CategorySummary {
                identifier: "en:snacks".to_string(),
                display_name: "Snacks".to_string(),
                product_count: 500,
            }])
        }
    }

    #[tokio::test]
    async fn completions_echo_the_ticket() {
        let worker = CatalogWorker::new(FakeCatalog);

        let response = worker.execute(FetchRequest::listing(11, 2, 3)).await;
        assert_eq!(response.ticket, 11);
        match response.outcome {
            FetchOutcome::Products(records) => {
                assert_eq!(records.len(), 3);
                assert_eq!(records[0].identifier(), Some("2-0"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn errors_become_typed_failures() {
        let worker = CatalogWorker::new(FakeCatalog);

        let miss = worker.execute(FetchRequest::barcode(1, "000".to_string())).await;
        assert!(matches!(miss.outcome, FetchOutcome::Failed(ref f) if f.kind == FailureKind::NotFound));

        let refused = worker.execute(FetchRequest::name_search(2, "oat".to_string(), 1, 24)).await;
        assert!(matches!(refused.outcome, FetchOutcome::Failed(ref f) if f.kind == FailureKind::Transport));

        let garbled = worker
            .execute(FetchRequest::category(3, "en:snacks".to_string(), 1, 24))
            .await;
        assert!(matches!(garbled.outcome, FetchOutcome::Failed(ref f) if f.kind == FailureKind::Decode));
    }

    #[tokio::test]
    async fn barcode_and_category_index_outcomes() {
        let worker = CatalogWorker::new(FakeCatalog);

        let hit = worker.execute(FetchRequest::barcode(4, "3017620422003".to_string())).await;
        assert!(matches!(hit.outcome, FetchOutcome::Product(ref r) if r.identifier() == Some("3017620422003")));

        let index = worker.execute(FetchRequest::categories(5)).await;
        assert!(matches!(index.outcome, FetchOutcome::Categories(ref c) if c.len() == 1));
    }
}
