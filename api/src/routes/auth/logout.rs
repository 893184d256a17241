use actix_web::{web, HttpResponse};

use bt_core::domain::value_objects::LogoutResponse;
use bt_core::repositories::RevocationStore;

use crate::app::AppState;
use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::error::ApiError;

use super::REFRESH_TOKEN_REQUIRED;

/// Handler for POST /api/auth/logout
///
/// Revokes the supplied refresh token. Access tokens issued alongside it stay
/// valid until they expire.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `refresh_token` missing
/// - 401 Unauthorized: Malformed, expired or badly signed token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout<S: RevocationStore + 'static>(
    state: web::Data<AppState<S>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = request
        .token()
        .ok_or_else(|| ApiError::validation(REFRESH_TOKEN_REQUIRED))?;

    state.issuer.revoke_session(token).await?;
    Ok(HttpResponse::Ok().json(LogoutResponse::default()))
}
