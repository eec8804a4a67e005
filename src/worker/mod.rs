//! Fetch worker for catalog requests.
//!
//! The coordinator never performs I/O itself. It emits `FetchRequest`s, the
//! runtime hands each one to a [`CatalogWorker`] on its own task, and the
//! resulting [`FetchResponse`] is fed back to the coordinator as an event.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol types with trace context propagation
//! - `handler`: worker implementation over the [`Catalog`](crate::gateway::Catalog) trait

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{
    CatalogQuery, FailureKind, FetchFailure, FetchOutcome, FetchRequest, FetchResponse, TraceContext,
};
