//! The global `tracing` subscriber.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::telemetry::{LogFormat, TelemetryConfig};

use super::ObservabilityError;

/// Dependencies that are noisy below `warn`.
const QUIET: [&str; 5] = ["h2", "hyper", "tonic", "sqlx", "opentelemetry"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

pub(super) fn install(
    config: &TelemetryConfig,
    spans: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel = spans.map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.export.service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(format_layer(config.log_format))
        .with(filter(&config.log_level))
        .with(otel)
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

fn filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_ignored| EnvFilter::new(directives(log_level)))
}

fn directives(log_level: &str) -> String {
    QUIET
        .iter()
        .fold(log_level.to_string(), |acc, target| format!("{acc},{target}=warn"))
}
