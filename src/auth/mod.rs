//! PSK authentication for the admin API.
//!
//! Public catalog routes are open; everything that mutates the catalog goes
//! through this layer. Key comparison is constant-time.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{AppError, ErrorResponse};

/// Header name for the admin API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Admin auth layer taking the expected PSK as a parameter.
///
/// If no PSK is configured, all requests pass (dev mode).
pub async fn psk_auth_layer(expected_psk: Option<String>, request: Request, next: Next) -> Response {
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    match provided_key(&request) {
        Some(key) if constant_time_compare(&key, &expected) => next.run(request).await,
        Some(_) => unauthorized_response("Invalid API key"),
        None => unauthorized_response("Missing API key"),
    }
}

/// Pull the key from `x-api-key` or a bearer `Authorization` header.
fn provided_key(request: &Request) -> Option<String> {
    let headers = request.headers();
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
                .map(|s| s.to_string())
        })
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse::new(&AppError::Unauthorized(message.to_string()));
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
