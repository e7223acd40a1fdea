use axum::{extract::Request, middleware::Next, response::Response};
use subtle::ConstantTimeEq;

use super::error::ApiError;

/// Extract a Bearer token from the Authorization header.
fn extract_bearer(req: &Request) -> Option<String> {
    if let Some(auth_header) = req.headers().get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Auth middleware: require a Bearer token matching the configured one,
/// compared in constant time.
pub async fn require_auth(
    expected_token: String,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match extract_bearer(&req) {
        Some(token) if bool::from(token.as_bytes().ct_eq(expected_token.as_bytes())) => {
            Ok(next.run(req).await)
        }
        Some(_) => Err(ApiError::AuthInvalid),
        None => Err(ApiError::AuthRequired),
    }
}
