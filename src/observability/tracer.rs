//! Tracer provider backed by a local OTLP/JSON file exporter.

use super::file_writer::RotatingFile;
use super::otlp_json::OtlpJsonEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes every exported batch as one JSON line.
struct FileSpanExporter {
    file: RotatingFile,
    encoder: OtlpJsonEncoder,
    stopped: AtomicBool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped.load(Ordering::SeqCst) {
            Err(TraceError::from("trace exporter already shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(format!("writing {}: {e}", self.file.path().display())))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    // The resource is fixed when the encoder is built.
    fn set_resource(&mut self, _resource: &Resource) {}
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports each span synchronously to `trace_file`.
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(trace_file),
        encoder: OtlpJsonEncoder::new(resource.clone(), scope),
        stopped: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
