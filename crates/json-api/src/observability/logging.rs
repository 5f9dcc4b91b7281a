//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Crates that are chatty at `info`; the storefront's own targets follow `RUST_LOG`.
const QUIET_TARGETS: [&str; 6] = ["sqlx", "h2", "hyper", "tower", "tonic", "opentelemetry"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        let tracer = provider.tracer(config.observability.otel_service_name.clone());

        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(otel_layer)
        .with(env_filter(&config.logging.log_level))
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

fn default_directives(log_level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(log_level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_targets_are_capped_at_warn() {
        let directives = default_directives("debug");

        assert!(directives.starts_with("debug,"), "base level comes first");
        assert!(directives.contains("sqlx=warn"), "sqlx is quietened");
        assert!(directives.ends_with("opentelemetry=warn"), "all targets listed");
    }
}
