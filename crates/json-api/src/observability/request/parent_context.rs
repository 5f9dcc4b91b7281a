//! Inbound W3C trace context.

use std::collections::HashMap;

use opentelemetry::{Context, global, trace::TraceContextExt as _};
use salvo::http::HeaderMap;

const TRACE_HEADERS: [&str; 2] = ["traceparent", "tracestate"];

/// Remote parent carried by `traceparent`/`tracestate`, if it is valid.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let carrier = trace_headers(headers);

    if carrier.is_empty() {
        return None;
    }

    global::get_text_map_propagator(|propagator| {
        let context = propagator.extract_with_context(&Context::new(), &carrier);

        context
            .span()
            .span_context()
            .is_valid()
            .then_some(context)
    })
}

fn trace_headers(headers: &HeaderMap) -> HashMap<String, String> {
    TRACE_HEADERS
        .iter()
        .filter_map(|name| {
            let value = headers.get(*name)?.to_str().ok()?;

            Some(((*name).to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use salvo::http::HeaderValue;

    use super::*;

    #[test]
    fn only_trace_headers_are_carried() {
        let mut headers = HeaderMap::new();

        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );
        headers.insert("cookie", HeaderValue::from_static("cart_session_key=abc"));

        let carrier = trace_headers(&headers);

        assert_eq!(carrier.len(), 1, "cookie must not leak into the carrier");
        assert!(carrier.contains_key("traceparent"), "traceparent is carried");
    }

    #[test]
    fn requests_without_trace_headers_have_no_parent() {
        assert!(
            extract_parent_context(&HeaderMap::new()).is_none(),
            "no headers means no remote parent"
        );
    }
}
