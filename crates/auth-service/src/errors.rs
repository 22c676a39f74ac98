//! Authentication service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. Every
//! token verification failure collapses into `AuthError::InvalidToken`, so
//! callers cannot tell which check rejected their token. The specific reason
//! is logged server-side at debug level.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic client-facing message for any rejected token.
pub const INVALID_TOKEN_MESSAGE: &str = "The access token is invalid or expired";

/// Client-facing message when no credentials were presented.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Authorization header missing";

const WWW_AUTHENTICATE_VALUE: &str = "Bearer realm=\"wasselli\", error=\"invalid_token\"";

/// Request-path error type.
///
/// Maps to HTTP status codes:
/// - MissingCredentials, InvalidToken: 401 Unauthorized
/// - Internal: 500 Internal Server Error
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header missing")]
    MissingCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal server error")]
    Internal,
}

impl AuthError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: &'static str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AuthError::MissingCredentials => ("UNAUTHORIZED", MISSING_CREDENTIALS_MESSAGE),
            AuthError::InvalidToken => ("INVALID_TOKEN", INVALID_TOKEN_MESSAGE),
            AuthError::Internal => ("INTERNAL_ERROR", "An internal error occurred"),
        };

        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail { code, message },
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
            );
        }

        response
    }
}
