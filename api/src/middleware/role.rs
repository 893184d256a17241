//! Role gate for routes behind [`BearerAuth`](super::auth::BearerAuth)
//!
//! Register `RequireRole` *before* `BearerAuth` on the same scope or
//! resource; actix runs the last registered middleware first, so the claims
//! are already in the request extensions when the gate runs.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use bt_core::{
    domain::entities::identity::{Role, RoleSet},
    errors::{AuthError, DomainError},
    services::guard::authorize,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use super::auth::{reject, AuthContext};

/// Role gate middleware factory
#[derive(Debug, Clone)]
pub struct RequireRole {
    allowed: Rc<RoleSet>,
}

impl RequireRole {
    pub fn new(allowed: RoleSet) -> Self {
        Self {
            allowed: Rc::new(allowed),
        }
    }

    /// Gate admitting any of `roles`
    pub fn any_of<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self::new(RoleSet::of(roles))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: Rc::clone(&self.allowed),
        }))
    }
}

/// Role gate middleware service
pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<RoleSet>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let claims = req
            .extensions()
            .get::<AuthContext>()
            .map(|context| context.claims.clone());

        let decision = match claims {
            Some(claims) => authorize(claims, &self.allowed).map(|_| ()),
            None => Err(DomainError::Auth(AuthError::MissingCredential)),
        };

        Box::pin(async move {
            match decision {
                Ok(()) => service.call(req).await.map(ServiceResponse::map_into_left_body),
                Err(e) => Ok(reject(req, e)),
            }
        })
    }
}
