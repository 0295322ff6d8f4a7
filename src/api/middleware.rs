use super::protocol::{HEADER_REQUEST_ID, HEADER_RESPONSE_TIME};

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Tags every request with a fresh id, logs it on the way in and out, and
/// reports the id and handling time in response headers.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::info!("[{}] {} {}", request_id, method, path);

    let mut response = next.run(request).await;

    let ms = start.elapsed().as_millis();
    let status = response.status();

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&format!("{}ms", ms)) {
        headers.insert(HEADER_RESPONSE_TIME, value);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(HEADER_REQUEST_ID, value);
    }

    if status.is_server_error() {
        tracing::error!(
            "[{}] Error processing {} {} - {} ({}ms)",
            request_id,
            method,
            path,
            status,
            ms
        );
    } else {
        tracing::info!(
            "[{}] {} {} - {} ({}ms)",
            request_id,
            method,
            path,
            status.as_u16(),
            ms
        );
    }

    response
}
