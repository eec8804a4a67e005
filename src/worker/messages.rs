//! Fetch request and completion types exchanged between the coordinator and
//! the fetch worker.
//!
//! Requests carry the ticket issued by the coordinator and the trace context
//! of the span that issued them, so the worker's fetch span joins the same
//! trace even though it runs on another task.

use crate::domain::error::FoodlensError;
use crate::domain::product::{CategorySummary, ProductRecord};

/// Distributed tracing context for cross-task span propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is otherwise invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        let trace_id = format!("{:032x}", span_context.trace_id());
        let parent_span_id = format!("{:016x}", span_context.span_id());

        tracing::trace!(trace_id = %trace_id, parent_span_id = %parent_span_id, "capturing trace context");

        Some(Self {
            trace_id,
            parent_span_id,
        })
    }

    /// Rebuilds a remote OpenTelemetry context to use as a span parent.
    ///
    /// Returns `None` if either identifier is not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// One catalog read operation with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    Listing { page: u32, page_size: u32 },
    NameSearch { term: String, page: u32, page_size: u32 },
    Barcode { code: String },
    Category { category_id: String, page: u32, page_size: u32 },
    Categories,
}

impl CatalogQuery {
    /// Short operation name used in logs and failure messages.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Listing { .. } => "fetch listing",
            Self::NameSearch { .. } => "search by name",
            Self::Barcode { .. } => "fetch by barcode",
            Self::Category { .. } => "fetch by category",
            Self::Categories => "fetch categories",
        }
    }
}

/// A fetch the coordinator wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Ticket the completion must echo back.
    pub ticket: u64,
    pub query: CatalogQuery,
    pub trace_context: Option<TraceContext>,
}

/// Generates `FetchRequest` constructors, one per query variant, that stamp
/// the request with the current trace context.
macro_rules! fetch_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl FetchRequest {
            $(
                #[doc = concat!("Creates a ", stringify!($variant), " request with the current trace context.")]
                #[must_use]
                pub fn $builder_name(ticket: u64, $($field: $ty),*) -> Self {
                    Self {
                        ticket,
                        query: CatalogQuery::$variant { $($field),* },
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

fetch_request_builders! {
    listing(Listing { page: u32, page_size: u32 }),
    name_search(NameSearch { term: String, page: u32, page_size: u32 }),
    barcode(Barcode { code: String }),
    category(Category { category_id: String, page: u32, page_size: u32 }),
    categories(Categories {}),
}

/// Coarse failure classification carried back to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Decode,
    NotFound,
}

/// A failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    /// Technical description for logs; never shown to the user as-is.
    pub message: String,
}

impl From<FoodlensError> for FetchFailure {
    fn from(err: FoodlensError) -> Self {
        let kind = match &err {
            FoodlensError::NotFound(_) => FailureKind::NotFound,
            FoodlensError::Decode(_) => FailureKind::Decode,
            _ => FailureKind::Transport,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Result payload of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Decoded batch from a listing, search or category page.
    Products(Vec<ProductRecord>),
    /// Barcode hit.
    Product(ProductRecord),
    /// Shaped category index.
    Categories(Vec<CategorySummary>),
    Failed(FetchFailure),
}

/// Completion of a [`FetchRequest`], matched to it by ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub ticket: u64,
    pub outcome: FetchOutcome,
}

impl FetchResponse {
    #[must_use]
    pub const fn new(ticket: u64, outcome: FetchOutcome) -> Self {
        Self { ticket, outcome }
    }

    /// Shorthand for a failed completion.
    #[must_use]
    pub fn failed(ticket: u64, kind: FailureKind, message: impl Into<String>) -> Self {
        Self::new(
            ticket,
            FetchOutcome::Failed(FetchFailure {
                kind,
                message: message.into(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_fill_the_query() {
        let request = FetchRequest::name_search(7, "muesli".to_string(), 2, 24);
        assert_eq!(request.ticket, 7);
        assert_eq!(
            request.query,
            CatalogQuery::NameSearch {
                term: "muesli".to_string(),
                page: 2,
                page_size: 24
            }
        );
        assert_eq!(FetchRequest::categories(3).query, CatalogQuery::Categories);
    }

    #[test]
    fn no_trace_context_without_a_subscriber() {
        assert!(FetchRequest::listing(1, 1, 24).trace_context.is_none());
    }

    #[test]
    fn trace_context_rebuilds_from_hex() {
        let context = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(context.to_otel_context().is_some());

        let broken = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(broken.to_otel_context().is_none());
    }

    #[test]
    fn failures_keep_their_kind() {
        let failure = FetchFailure::from(FoodlensError::NotFound("123".to_string()));
        assert_eq!(failure.kind, FailureKind::NotFound);

        let failure = FetchFailure::from(FoodlensError::Decode("bad".to_string()));
        assert_eq!(failure.kind, FailureKind::Decode);

        let failure = FetchFailure::from(FoodlensError::Transport("HTTP 500".to_string()));
        assert_eq!(failure.kind, FailureKind::Transport);
        assert!(failure.message.contains("HTTP 500"));
    }
}
