//! Bearer authentication middleware for protecting API endpoints.
//!
//! `BearerAuth` passes the `Authorization` header to an [`Authenticator`]
//! (normally the core `AccessGuard`) and stores the verified claims in the
//! request extensions, where [`AuthContext`] and `RequireRole` pick them up.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use bt_core::{
    domain::entities::identity::{Identity, Role},
    domain::entities::token::{Claims, TokenKind},
    errors::{AuthError, DomainError, TokenError},
    repositories::RevocationStore,
    services::guard::AccessGuard,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;

use crate::handlers::error::ApiError;

/// Verified caller injected into requests by [`BearerAuth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub claims: Claims,
}

impl AuthContext {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn subject_id(&self) -> &str {
        &self.claims.sub
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    pub fn kind(&self) -> TokenKind {
        self.claims.kind
    }

    pub fn identity(&self) -> Identity {
        self.claims.identity()
    }
}

/// Object-safe view of the access guard used by the middleware
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, header: Option<&str>) -> Result<Claims, DomainError>;
}

#[async_trait]
impl<S: RevocationStore + 'static> Authenticator for AccessGuard<S> {
    async fn authenticate(&self, header: Option<&str>) -> Result<Claims, DomainError> {
        AccessGuard::authenticate(self, header).await
    }
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct BearerAuth {
    authenticator: Arc<dyn Authenticator>,
}

impl BearerAuth {
    /// Creates the middleware over the given authenticator
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
        }))
    }
}

/// Bearer authentication middleware service
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = Arc::clone(&self.authenticator);

        Box::pin(async move {
            let header = match read_authorization(&req) {
                Ok(header) => header,
                Err(e) => return Ok(reject(req, e)),
            };

            match authenticator.authenticate(header.as_deref()).await {
                Ok(claims) => {
                    debug!(sub = %claims.sub, path = %req.path(), "Request authenticated");
                    req.extensions_mut().insert(AuthContext::new(claims));
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => Ok(reject(req, e)),
            }
        })
    }
}

/// Reads the raw `Authorization` header value
///
/// A header that is not visible ASCII cannot hold a token and is treated as
/// malformed.
fn read_authorization(req: &ServiceRequest) -> Result<Option<String>, DomainError> {
    match req.headers().get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|s| Some(s.to_string()))
            .map_err(|_| DomainError::Token(TokenError::Malformed)),
    }
}

pub(crate) fn reject<B>(req: ServiceRequest, error: DomainError) -> ServiceResponse<EitherBody<B>> {
    let response = ApiError::new(error).error_response();
    req.into_response(response).map_into_right_body()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::MissingCredential));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;
    use actix_web::test;

    #[::std::prelude::v1::test]
    fn test_read_authorization() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(
            read_authorization(&req).unwrap().as_deref(),
            Some("Bearer test_token_123")
        );

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(read_authorization(&req_no_header).unwrap(), None);
    }

    #[::std::prelude::v1::test]
    fn test_non_ascii_header_is_malformed() {
        let value = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap();
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, value))
            .to_srv_request();

        assert!(matches!(
            read_authorization(&req),
            Err(DomainError::Token(TokenError::Malformed))
        ));
    }
}
