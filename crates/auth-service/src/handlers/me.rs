//! Current identity handler.
//!
//! Returns the verified claims of the caller. Mounted behind the
//! authentication gate.

use crate::context::AuthContext;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

/// Response for `/api/v1/me`.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub subject_id: String,
    pub role: String,
    pub issuer: String,
    pub expires_at: i64,
}

/// Handler for GET /api/v1/me
///
/// ```json
/// {
///   "subject_id": "u-42",
///   "role": "rider",
///   "issuer": "Wasselli App",
///   "expires_at": 1700000900
/// }
/// ```
#[instrument(skip_all, name = "auth.handlers.me")]
pub async fn get_me(context: AuthContext) -> Json<MeResponse> {
    let claims = context.claims();

    Json(MeResponse {
        subject_id: claims.subject_id.clone(),
        role: claims.role.clone(),
        issuer: claims.issuer.clone(),
        expires_at: claims.expires_at,
    })
}
