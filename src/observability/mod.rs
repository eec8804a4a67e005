//! Tracing setup with local OTLP/JSON span export.
//!
//! ```text
//! tracing spans -> tracing-opentelemetry -> opentelemetry_sdk provider
//!               -> FileSpanExporter -> <data_dir>/foodlens-otlp.json
//! ```
//!
//! The trace file rotates at 10 MB and keeps three backups. Filter level
//! comes from `RUST_LOG`, then the `trace_level` setting, then `info`.

mod file_writer;
mod init;
mod otlp_json;
mod tracer;

pub use init::{init_tracing, TracingGuard, TRACE_FILE};
