use actix_web::{web, HttpResponse};
use tracing::warn;

use bt_core::repositories::RevocationStore;

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports `degraded` with 503 when the revocation store does not answer.
pub async fn health_check<S: RevocationStore + 'static>(
    state: web::Data<AppState<S>>,
) -> HttpResponse {
    let store_up = match state.store.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(error = %e, "Revocation store health check failed");
            false
        }
    };

    let mut response = if store_up {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };

    response.json(serde_json::json!({
        "status": if store_up { "healthy" } else { "degraded" },
        "service": "bug-tracker-api",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "revocation_store": if store_up { "up" } else { "down" },
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
