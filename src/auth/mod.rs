//! API-key authentication module.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::config::Environment;
use crate::errors::{codes, ErrorResponse};

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// API-key authentication layer for protected routes.
///
/// Policy when no key is configured is environment-driven: development
/// leaves the gate open, production rejects every protected request with
/// guidance to set the key.
pub async fn api_key_layer(
    expected_key: Option<String>,
    environment: Environment,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = expected_key else {
        if environment.is_production() {
            return rejection_response(
                StatusCode::UNAUTHORIZED,
                codes::API_KEY_REQUIRED,
                "API key authentication is not configured. Set RECIPE_API_KEY on the server.",
            );
        }
        // No key configured in development: gate disabled
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    match provided {
        Some(provided_key) => {
            // Constant-time comparison to prevent timing attacks
            if constant_time_compare(&provided_key, &expected) {
                next.run(request).await
            } else {
                rejection_response(
                    StatusCode::FORBIDDEN,
                    codes::API_KEY_INVALID,
                    "Invalid API key",
                )
            }
        }
        None => rejection_response(
            StatusCode::UNAUTHORIZED,
            codes::API_KEY_MISSING,
            "Missing API key",
        ),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Create an auth-rejection response.
fn rejection_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = ErrorResponse {
        code: code.to_string(),
        message: message.to_string(),
    };

    (status, Json(body)).into_response()
}
