use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::platform::UpstreamError;

/// Structured error type for all API handlers.
///
/// Each variant maps to an HTTP status code, a machine-readable code string,
/// and a human-readable message. Implements [`IntoResponse`] so handlers can
/// return `Result<T, ApiError>` directly.
#[derive(Debug)]
pub enum ApiError {
    /// 401 - No authentication credentials provided.
    AuthRequired,
    /// 403 - Credentials provided but invalid.
    AuthInvalid,
    /// 400 - The request has no checkout session cookie.
    SessionRequired,
    /// 400 - Product list payload matched none of the selection shapes.
    /// Carries the serialized offending input.
    UnknownSelection(String),
    /// 400 - Malformed or invalid request.
    InvalidRequest(String),
    /// Upstream answered with a non-2xx status; mirrored to the client
    /// with the upstream body.
    Upstream { status: u16, body: String },
    /// 502 - Could not reach the upstream platform.
    UpstreamUnreachable(String),
    /// 502 - Upstream answered with a body we could not decode.
    UpstreamDecode(String),
    /// 500 - Catch-all internal error.
    InternalError(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error variant.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthRequired => StatusCode::UNAUTHORIZED,
            ApiError::AuthInvalid => StatusCode::FORBIDDEN,
            ApiError::SessionRequired => StatusCode::BAD_REQUEST,
            ApiError::UnknownSelection(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamDecode(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a machine-readable error code string.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::AuthRequired => "auth_required",
            ApiError::AuthInvalid => "auth_invalid",
            ApiError::SessionRequired => "session_required",
            ApiError::UnknownSelection(_) => "unknown_selection",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Upstream { .. } => "upstream_error",
            ApiError::UpstreamUnreachable(_) => "upstream_unreachable",
            ApiError::UpstreamDecode(_) => "upstream_decode",
            ApiError::InternalError(_) => "internal_error",
        }
    }

    /// Returns a human-readable error message.
    pub fn message(&self) -> String {
        match self {
            ApiError::AuthRequired => {
                "Authentication required. Provide a token via the Authorization header."
                    .to_string()
            }
            ApiError::AuthInvalid => "Invalid authentication token.".to_string(),
            ApiError::SessionRequired => {
                "No checkout session. The request carries no order-form cookie.".to_string()
            }
            ApiError::UnknownSelection(input) => {
                format!("Unrecognized product selection: {}.", input)
            }
            ApiError::InvalidRequest(detail) => format!("Invalid request: {}.", detail),
            ApiError::Upstream { status, .. } => {
                format!("Upstream platform returned status {}.", status)
            }
            ApiError::UpstreamUnreachable(detail) => {
                format!("Upstream platform unreachable: {}.", detail)
            }
            ApiError::UpstreamDecode(detail) => {
                format!("Invalid response from upstream platform: {}.", detail)
            }
            ApiError::InternalError(detail) => format!("Internal error: {}.", detail),
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, body } => ApiError::Upstream { status, body },
            UpstreamError::Transport(e) => ApiError::UpstreamUnreachable(e.to_string()),
            UpstreamError::Decode(detail) => ApiError::UpstreamDecode(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut error = serde_json::json!({
            "code": self.code(),
            "message": self.message(),
        });
        // Upstream failures keep the upstream body so the storefront sees
        // the platform's own validation messages.
        if let ApiError::Upstream { ref body, .. } = self {
            error["upstream"] = serde_json::from_str(body)
                .unwrap_or_else(|_| serde_json::Value::String(body.clone()));
        }
        let body = serde_json::json!({ "error": error });
        (self.status_code(), Json(body)).into_response()
    }
}
