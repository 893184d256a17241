use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;

use bt_api::{config, configure_app, telemetry, AppState};
use bt_core::services::guard::RevocationFailurePolicy;
use bt_core::services::token::{KeyProvider, TokenCodec, TokenServiceConfig};
use bt_infra::{RedisClient, RedisRevocationStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = config::load();

    if let Err(e) = telemetry::init_tracing(&config.logging) {
        eprintln!("Tracing already initialised: {}", e);
    }

    info!(environment = ?config.environment, "Starting Bug Tracker API server");

    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt).map_err(|e| {
        error!(error = %e, "Invalid token configuration, refusing to start");
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let keys = KeyProvider::from_config(&config.auth.jwt)
        .and_then(|keys| keys.preload().map(|_| keys))
        .map_err(|e| {
            error!(error = %e, "Signing keys unavailable, refusing to start");
            io::Error::new(io::ErrorKind::InvalidData, e.to_string())
        })?;

    let codec = Arc::new(TokenCodec::new(Arc::new(keys), token_config));

    let redis = RedisClient::new(config.cache.clone()).await.map_err(|e| {
        error!(error = %e, "Failed to connect to the revocation store");
        io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
    })?;
    let store = Arc::new(RedisRevocationStore::with_config(
        redis,
        &config.auth.revocation,
    ));

    let policy = RevocationFailurePolicy::from_fail_open(config.auth.revocation.fail_open);
    if policy == RevocationFailurePolicy::FailOpen {
        warn!("Revocation checks fail open: store outages will admit tokens");
    }

    let state = web::Data::new(AppState::new(codec, store, policy));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}
