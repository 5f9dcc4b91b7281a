//! Request-level logging, request IDs, cart session tagging and parent trace extraction.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use storefront_app::domain::reservations::models::SessionKey;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Probe and scrape endpoints are served without a request span.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[derive(Debug)]
struct CompletedRequest<'a> {
    method: &'a str,
    path: &'a str,
    request_id: &'a str,
    status: StatusCode,
    elapsed: Duration,
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        cart_session = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    attach_remote_parent(req, &span);

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    // The session middleware runs inside this one, so the key is only known afterwards.
    if let Ok(session) = depot.obtain::<SessionKey>() {
        span.record("cart_session", tracing::field::display(session));
    }

    let completed = CompletedRequest {
        method: &method,
        path: &path,
        request_id: &request_id,
        status: request_ids::response_status_or_ok(res.status_code),
        elapsed: started.elapsed(),
    };

    metrics::observe_request(
        &method,
        &names.otel_path,
        completed.status.as_u16(),
        completed.elapsed.as_secs_f64(),
    );

    span.record("status", completed.status.as_u16());
    span.record("duration_ms", completed.elapsed.as_millis());

    span.in_scope(|| log_completion(&completed));
}

fn attach_remote_parent(req: &Request, span: &Span) {
    if !settings::request_settings().parent_propagation {
        return;
    }

    if let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }
}

fn log_completion(request: &CompletedRequest<'_>) {
    let status = request.status.as_u16();
    let duration_ms = request.elapsed.as_millis();

    info!(status, duration_ms, "request.completed");

    if request.status.is_server_error() {
        error!(
            status,
            method = %request.method,
            path = %request.path,
            request_id = %request.request_id,
            "server error response"
        );
    } else if request.status.is_client_error() {
        warn!(
            status,
            method = %request.method,
            path = %request.path,
            request_id = %request.request_id,
            "client error response"
        );
    }

    let threshold = settings::request_settings().slow_request_threshold;

    if request.elapsed > threshold {
        let threshold_ms = threshold.as_millis();

        warn!(
            method = %request.method,
            path = %request.path,
            request_id = %request.request_id,
            duration_ms,
            threshold_ms,
            "slow request detected"
        );
    }
}
