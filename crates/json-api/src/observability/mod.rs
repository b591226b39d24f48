//! Logs, traces and metrics for the HTTP server.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use thiserror::Error;
use tracing::error;

use crate::config::telemetry::TelemetryConfig;

mod export;
mod logging;
mod metrics;
mod request;
mod settings;

pub(crate) use metrics::metrics_handler;
pub(crate) use request::request_logging;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Installed telemetry. Call [`Observability::shutdown`] to flush pending spans.
#[derive(Debug)]
pub(crate) struct Observability {
    spans: Option<SdkTracerProvider>,
}

impl Observability {
    pub(crate) fn init(config: &TelemetryConfig) -> Result<Self, ObservabilityError> {
        settings::configure(config);

        let spans = config
            .export
            .enabled
            .then(|| {
                global::set_text_map_propagator(TraceContextPropagator::new());

                export::tracer_provider(&config.export)
            })
            .transpose()?;

        logging::install(config, spans.as_ref())?;

        Ok(Self { spans })
    }

    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.spans
            && let Err(source) = provider.shutdown()
        {
            error!("failed to flush spans on shutdown: {source}");
        }
    }
}
