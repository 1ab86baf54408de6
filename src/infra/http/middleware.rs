use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Sent by the datastar client on every `@post` panel action.
const DATASTAR_REQUEST_HEADER: &str = "datastar-request";

const LOG_TARGET: &str = "reelboard::http::response";

/// Per-request correlation id, stored in both request and response extensions.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
}

/// Reuse a caller-supplied `x-request-id` when it is a plain token, otherwise mint one.
pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| is_token(value))
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string);

    let ctx = RequestContext { request_id };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response.extensions_mut().insert(ctx);
    response
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 128
        && value
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.'))
}

/// First path segment, which names the list screen.
fn screen_of(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let panel = request.headers().contains_key(DATASTAR_REQUEST_HEADER);
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();
    let screen = screen_of(uri.path());

    if !(status.is_client_error() || status.is_server_error()) {
        debug!(
            target = LOG_TARGET,
            status = status.as_u16(),
            method = %method,
            screen,
            panel,
            elapsed_ms,
            request_id,
            "request served",
        );
        return response;
    }

    let (source, messages) = response
        .extensions_mut()
        .remove::<ErrorReport>()
        .map_or(("unknown", Vec::new()), |report| {
            (report.source, report.messages)
        });
    let detail = messages.first().map_or("no diagnostic available", String::as_str);

    if status.is_server_error() {
        error!(
            target = LOG_TARGET,
            status = status.as_u16(),
            method = %method,
            screen,
            panel,
            query = uri.query().unwrap_or(""),
            elapsed_ms,
            source,
            detail,
            chain = ?messages,
            request_id,
            "dashboard request failed",
        );
    } else {
        warn!(
            target = LOG_TARGET,
            status = status.as_u16(),
            method = %method,
            screen,
            panel,
            query = uri.query().unwrap_or(""),
            elapsed_ms,
            source,
            detail,
            chain = ?messages,
            request_id,
            "dashboard request rejected",
        );
    }

    response
}
