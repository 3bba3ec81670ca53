//! Defines application-specific Axum middleware.

use std::time::Instant;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Logs every request and response with a correlation id. The id is taken
/// from an incoming `x-request-id` header or generated, stored in request
/// extensions, and echoed on the response.
pub async fn request_response_logger(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let start_time = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let c_id = req
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    req.extensions_mut().insert(c_id.clone());

    tracing::info!(
        _cID = c_id,
        method = %method,
        uri = %uri,
        version = ?version,
        "Incoming request"
    );

    let mut response = next.run(req).await;

    let duration = start_time.elapsed();
    let status = response.status();

    response.headers_mut().insert(
        HeaderName::from_static("x-request-id"),
        HeaderValue::from_str(c_id.as_str()).unwrap_or_else(|_| HeaderValue::from_static("invalid-correlation-id")),
    );

    if status.is_server_error() {
        tracing::error!(
            _cID = c_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = duration.as_millis(),
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            _cID = c_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = duration.as_millis(),
            "Request completed with client error"
        );
    } else {
        tracing::info!(
            _cID = c_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = duration.as_millis(),
            "Request completed successfully"
        );
    }

    Ok(response)
}
