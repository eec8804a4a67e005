//! Subscriber setup.

use super::tracer::file_tracer_provider;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "foodlens";

/// File name of the span export inside the data directory.
pub const TRACE_FILE: &str = "foodlens-otlp.json";

/// Keeps the tracer provider alive; shutting it down on drop.
#[must_use = "dropping the guard stops span export"]
#[derive(Debug, Default)]
pub struct TracingGuard {
    provider: Option<TracerProvider>,
}

impl TracingGuard {
    /// Whether spans are being written to the trace file.
    pub const fn exports_spans(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("foodlens: trace export shutdown failed: {e}");
            }
        }
    }
}

/// Resolves the filter directive: `RUST_LOG`, then the configured level,
/// then `info`.
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Installs the global subscriber.
///
/// Spans go to `<data_dir>/foodlens-otlp.json` as OTLP/JSON. When
/// `log_to_stderr` is set, events are also printed to stderr. If the data
/// directory cannot be created, file export is skipped. Calling this twice
/// leaves the first subscriber in place.
///
/// # Examples
///
/// ```no_run
/// use foodlens::observability::init_tracing;
/// use foodlens::Config;
///
/// let dir = std::env::temp_dir().join("foodlens-doc");
/// let _guard = init_tracing(&Config::default(), &dir);
/// tracing::info!("ready");
/// ```
pub fn init_tracing(config: &Config, data_dir: &Path) -> TracingGuard {
    let provider = match std::fs::create_dir_all(data_dir) {
        Ok(()) => {
            let resource = Resource::new(vec![
                opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
                opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            ]);
            Some(file_tracer_provider(data_dir.join(TRACE_FILE), resource, SERVICE_NAME))
        }
        Err(e) => {
            if config.log_to_stderr {
                eprintln!("foodlens: trace export disabled, cannot create {}: {e}", data_dir.display());
            }
            None
        }
    };

    let otel_layer = provider
        .as_ref()
        .map(|provider| OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));
    let stderr_layer = config
        .log_to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true));

    let installed = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(otel_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(trace_file = provider.is_some(), "tracing initialized");
        TracingGuard { provider }
    } else {
        TracingGuard::default()
    }
}
