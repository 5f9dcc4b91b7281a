//! Request-logging settings shared with the request middleware.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::ObservabilityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestSettings {
    /// Requests slower than this are logged as warnings.
    pub(super) slow_request_threshold: Duration,

    /// Continue inbound W3C traces instead of starting a new root span.
    pub(super) parent_propagation: bool,
}

impl RequestSettings {
    const DEFAULT: Self = Self {
        slow_request_threshold: Duration::from_secs(1),
        parent_propagation: false,
    };

    fn from_config(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(config.slow_request_threshold_ms),
            parent_propagation: config.otel_enabled && config.otel_parent_propagation_enabled,
        }
    }
}

static REQUEST_SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

/// First call wins; later calls are ignored.
pub(super) fn apply_runtime_config(config: &ObservabilityConfig) {
    REQUEST_SETTINGS.get_or_init(|| RequestSettings::from_config(config));
}

pub(super) fn request_settings() -> RequestSettings {
    REQUEST_SETTINGS
        .get()
        .copied()
        .unwrap_or(RequestSettings::DEFAULT)
}
