//! Logging and optional `OpenTelemetry` trace export.
//!
//! Log output always goes through the `fmt` layer, filtered by `RUST_LOG`
//! (default `info`). When telemetry is enabled an OTLP layer is stacked on
//! top so request and delivery spans reach a collector as well.

use std::time::Duration;

use opentelemetry::trace::{TraceError, TracerProvider};
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{BatchSpanProcessor, Sampler, SdkTracerProvider};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{OtlpProtocol, TelemetryConfig};

/// Handle returned by [`init`]. Call [`TelemetryGuard::shutdown`] before
/// exiting to flush pending spans.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Flush pending spans and shut down the exporter.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!(error = %e, "OpenTelemetry tracer provider shutdown failed");
        }
    }
}

/// Install the global tracing subscriber.
///
/// A broken exporter configuration never stops the relay: the error is
/// logged once the subscriber is up and only `fmt` output remains.
pub fn init(config: &TelemetryConfig) -> TelemetryGuard {
    let (provider, export_error) = if config.enabled {
        match build_provider(config) {
            Ok(provider) => (Some(provider), None),
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer("glpi-relay")));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .init();

    if let Some(e) = export_error {
        error!(
            error = %e,
            endpoint = %config.endpoint,
            protocol = ?config.protocol,
            "failed to build OTLP exporter, traces are not exported"
        );
    } else if provider.is_some() {
        info!(
            endpoint = %config.endpoint,
            protocol = ?config.protocol,
            sample_ratio = config.sample_ratio,
            "OpenTelemetry tracing enabled"
        );
    }

    TelemetryGuard { provider }
}

/// Build the tracer provider and register it globally.
fn build_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, TraceError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let exporter = match config.protocol {
        OtlpProtocol::Http => SpanExporter::builder()
            .with_http()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build()?,
        OtlpProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build()?,
    };

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", config.service_name.clone()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_span_processor(BatchSpanProcessor::builder(exporter).build())
        .with_sampler(sampler(config.sample_ratio))
        .with_resource(resource)
        .build();
    global::set_tracer_provider(provider.clone());
    Ok(provider)
}

fn sampler(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    }
}
