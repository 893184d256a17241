//! Application state and route wiring
//!
//! This module holds the shared services and registers the HTTP routes on an
//! Actix-web application.

use std::sync::Arc;

use actix_web::web;

use bt_core::repositories::RevocationStore;
use bt_core::services::guard::{AccessGuard, RevocationFailurePolicy};
use bt_core::services::session::SessionIssuer;
use bt_core::services::token::TokenCodec;

use crate::handlers::error::ApiError;
use crate::middleware::auth::{Authenticator, BearerAuth};
use crate::routes::auth::{logout, me, refresh_token};
use crate::routes::health::health_check;

/// Application state that holds shared services
pub struct AppState<S: RevocationStore> {
    pub issuer: SessionIssuer<S>,
    pub guard: AccessGuard<S>,
    pub store: Arc<S>,
}

impl<S: RevocationStore + 'static> AppState<S> {
    /// Builds issuer and guard over one codec and one store
    pub fn new(codec: Arc<TokenCodec>, store: Arc<S>, policy: RevocationFailurePolicy) -> Self {
        Self {
            issuer: SessionIssuer::new(Arc::clone(&codec), Arc::clone(&store)),
            guard: AccessGuard::new(codec, Arc::clone(&store)).with_failure_policy(policy),
            store,
        }
    }

    /// The guard as a middleware authenticator
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::new(self.guard.clone())
    }
}

/// Registers every route on the application
///
/// ```text
/// GET  /health
/// POST /api/auth/refresh
/// POST /api/auth/logout
/// GET  /api/auth/me        (bearer)
/// ```
pub fn configure_app<S: RevocationStore + 'static>(
    state: web::Data<AppState<S>>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let bearer = BearerAuth::new(state.authenticator());
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into());

        cfg.app_data(state)
            .route("/health", web::get().to(health_check::<S>))
            .service(
                web::scope("/api/auth")
                    .app_data(json_config)
                    .route("/refresh", web::post().to(refresh_token::<S>))
                    .route("/logout", web::post().to(logout::<S>))
                    .service(
                        web::resource("/me")
                            .wrap(bearer)
                            .route(web::get().to(me)),
                    ),
            );
    }
}
