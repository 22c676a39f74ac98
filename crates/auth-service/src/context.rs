//! Per-request authentication context and the claims accessor.
//!
//! The authentication gate inserts an [`AuthContext`] into the extensions of
//! the request it forwards. Extensions belong to that single request, so a
//! context is never visible to any other request.

use crate::crypto::Claims;
use crate::errors::AuthError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{Extensions, Request};
use std::sync::Arc;

/// Verified identity attached to a request by the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    claims: Arc<Claims>,
}

impl AuthContext {
    pub fn new(claims: Claims) -> Self {
        Self {
            claims: Arc::new(claims),
        }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

/// Claims attached to this request, or `None` if the gate did not run.
pub fn current_claims(extensions: &Extensions) -> Option<&Claims> {
    extensions.get::<AuthContext>().map(AuthContext::claims)
}

/// Extension trait for reading verified claims off a request.
pub trait ClaimsExt {
    /// Returns `None` if the auth middleware was not applied to this request.
    fn claims(&self) -> Option<&Claims>;
}

impl<B> ClaimsExt for Request<B> {
    fn claims(&self) -> Option<&Claims> {
        current_claims(self.extensions())
    }
}

impl ClaimsExt for Parts {
    fn claims(&self) -> Option<&Claims> {
        current_claims(&self.extensions)
    }
}

/// Extracting an `AuthContext` on a route the gate does not protect is a
/// wiring bug, so it fails with a 500 instead of a 401.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().cloned().ok_or_else(|| {
            tracing::error!(
                target: "auth.gate",
                "AuthContext requested on a route without the authentication gate"
            );
            AuthError::Internal
        })
    }
}
