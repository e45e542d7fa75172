//! API Middleware - Request ID tracking
//!
//! The service is unauthenticated and read-only, so request correlation is
//! the only middleware concern left beyond the tower-http layers.

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Stamp an `X-Request-ID` header on the request and its response so log
/// lines can be correlated with client traffic.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let request_id = uuid::Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "X-Request-ID",
        request_id.parse().unwrap(),
    );

    let mut response = next.run(request).await;

    response.headers_mut().insert(
        "X-Request-ID",
        request_id.parse().unwrap(),
    );

    Ok(response)
}
