//! Authentication gate for protected routes.
//!
//! [`AuthGate::authenticate`] is the forward-or-reject decision and knows
//! nothing about routing. [`require_auth`] adapts it to axum middleware.
//!
//! Per request: read the `Authorization` header, strip the `Bearer ` prefix,
//! hand the remainder to the verifier and, on success, attach the claims to
//! the request before running the protected handler.

use crate::context::AuthContext;
use crate::crypto::VerifyToken;
use crate::errors::AuthError;
use crate::observability::metrics::record_token_validation;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::IntoResponse,
};
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

const BEARER_PREFIX: &str = "Bearer ";

/// Decides whether a request may reach a protected operation.
///
/// Holds no per-request state. The verifier behind it is shared read-only.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn VerifyToken>,
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn VerifyToken>) -> Self {
        Self { verifier }
    }

    /// Returns the context to attach on success, or the error to respond with.
    ///
    /// A missing header and a header without the `Bearer ` scheme are both
    /// rejected without consulting the verifier.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let header_value = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                record_token_validation("error", Some("missing_credentials"));
                tracing::debug!(target: "auth.gate", "Missing Authorization header");
                AuthError::MissingCredentials
            })?;

        let token = header_value.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
            record_token_validation("error", Some("invalid_scheme"));
            tracing::debug!(target: "auth.gate", "Authorization header is not a Bearer credential");
            AuthError::InvalidToken
        })?;

        // Rejection details are logged and counted by the verifier.
        let claims = self
            .verifier
            .verify_token(token)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthContext::new(claims))
    }
}

/// Middleware that rejects unauthenticated requests with 401 and otherwise
/// forwards them with an [`AuthContext`] in the request extensions.
///
/// ```text
/// Authorization: Bearer <token>
/// ```
#[instrument(skip_all, name = "auth.middleware.require_auth")]
pub async fn require_auth(
    State(gate): State<Arc<AuthGate>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let context = gate.authenticate(req.headers())?;
    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}
