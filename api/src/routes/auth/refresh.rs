use actix_web::{web, HttpResponse};

use bt_core::domain::value_objects::AuthResponse;
use bt_core::repositories::RevocationStore;

use crate::app::AppState;
use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::error::ApiError;

use super::REFRESH_TOKEN_REQUIRED;

/// Handler for POST /api/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented token is burned
/// and cannot be used again.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `refresh_token` missing
/// - 401 Unauthorized: Malformed, expired, wrong kind, or already used
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh_token<S: RevocationStore + 'static>(
    state: web::Data<AppState<S>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = request
        .token()
        .ok_or_else(|| ApiError::validation(REFRESH_TOKEN_REQUIRED))?;

    let pair = state.issuer.rotate(token).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::from(pair)))
}
