use actix_web::HttpResponse;

use crate::dto::auth::MeResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/auth/me
///
/// Returns the claims of the bearer token. Must be mounted behind
/// `BearerAuth`.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse::from(auth.claims))
}
