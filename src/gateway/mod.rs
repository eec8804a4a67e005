//! Query gateway: the access layer for the external product catalog.
//!
//! The gateway is the sole owner of request construction and response-shape
//! assumptions. It issues one of five read operations, returns decoded records
//! or a typed failure, and provides the pure shaping functions (sorting,
//! category trimming) that depend on a single response only.
//!
//! # Modules
//!
//! - `backend`: [`Catalog`] trait, one method per catalog operation
//! - `client`: [`CatalogClient`], the `reqwest` implementation
//! - `endpoints`: URL templates and percent-encoding
//! - `wire`: lenient decoding of catalog payloads
//! - `shaping`: [`sort_records`], [`shape_categories`], [`SortKey`]

pub mod backend;
pub mod client;
pub mod endpoints;
pub mod shaping;
pub mod wire;

pub use backend::Catalog;
pub use client::{CatalogClient, ClientSettings, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use shaping::{locale_compare, shape_categories, sort_records, SortKey};
