//! Logging and trace export settings.

use std::time::Duration;

use clap::{Args, ValueEnum};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line events.
    Compact,

    /// One JSON object per event.
    Json,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Telemetry")]
pub struct TelemetryConfig {
    /// Default filter directive when `RUST_LOG` holds no valid filter
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Requests slower than this are logged as warnings
    #[arg(long = "slow-request-ms", env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_ms: u64,

    #[command(flatten)]
    pub export: TraceExportConfig,
}

/// OTLP trace export. Off unless `--otel-enabled` is set.
#[derive(Debug, Args)]
#[command(next_help_heading = "Trace export")]
pub struct TraceExportConfig {
    #[arg(long = "otel-enabled", env = "OTEL_ENABLED", default_value_t = false)]
    pub enabled: bool,

    /// Continue traces named by incoming `traceparent` headers
    #[arg(
        long = "otel-propagate-parent",
        env = "OTEL_PARENT_PROPAGATION_ENABLED",
        default_value_t = false
    )]
    pub propagate_parent: bool,

    /// OTLP gRPC collector
    #[arg(
        long = "otel-endpoint",
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub endpoint: String,

    /// Export timeout in whole seconds
    #[arg(
        long = "otel-timeout",
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value = "3",
        value_parser = parse_seconds
    )]
    pub timeout: Duration,

    #[arg(
        long = "otel-service-name",
        env = "OTEL_SERVICE_NAME",
        default_value = "littlelemon-json"
    )]
    pub service_name: String,

    #[arg(
        long = "otel-service-version",
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub service_version: String,

    #[arg(
        long = "otel-environment",
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: String,

    /// Fraction of root traces that are sampled
    #[arg(
        long = "otel-sample-ratio",
        env = "OTEL_TRACE_SAMPLE_RATIO",
        default_value = "1.0",
        value_parser = parse_ratio
    )]
    pub sample_ratio: f64,
}

impl TraceExportConfig {
    /// Remote parents only matter when spans leave the process.
    #[must_use]
    pub fn continues_remote_parents(&self) -> bool {
        self.enabled && self.propagate_parent
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|error| format!("expected whole seconds: {error}"))
}

fn parse_ratio(value: &str) -> Result<f64, String> {
    let ratio = value
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("expected a number: {error}"))?;

    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("{ratio} is outside 0.0..=1.0"))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        telemetry: TelemetryConfig,
    }

    #[test]
    fn export_is_opt_in() -> TestResult {
        let config = Harness::try_parse_from(["test"])?.telemetry;

        assert_eq!(config.slow_request_ms, 1_000);
        assert_eq!(config.export.timeout, Duration::from_secs(3));
        assert!(!config.export.continues_remote_parents(), "export is off");

        Ok(())
    }

    #[test]
    fn parent_propagation_needs_export() -> TestResult {
        let config = Harness::try_parse_from(["test", "--otel-propagate-parent"])?.telemetry;

        assert!(!config.export.continues_remote_parents(), "export is off");

        let config =
            Harness::try_parse_from(["test", "--otel-propagate-parent", "--otel-enabled"])?
                .telemetry;

        assert!(config.export.continues_remote_parents(), "export is on");

        Ok(())
    }

    #[test]
    fn sample_ratio_must_be_a_fraction() {
        assert!(parse_ratio("0.25").is_ok(), "a quarter");
        assert!(parse_ratio("1").is_ok(), "everything");
        assert!(parse_ratio("1.5").is_err(), "above one");
        assert!(parse_ratio("-0.1").is_err(), "below zero");
        assert!(parse_ratio("most").is_err(), "not a number");
    }

    #[test]
    fn timeout_is_whole_seconds() {
        assert_eq!(parse_seconds("10"), Ok(Duration::from_secs(10)));
        assert!(parse_seconds("1.5").is_err(), "fractional seconds");
    }
}
