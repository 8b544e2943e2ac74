use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::auth_service::JwtConfig;
use crate::utils::AppError;

pub use crate::services::auth_service::Claims;

/// Verifies the bearer token and stores its `Claims` in the request
/// extensions, where handlers pick them up with `web::ReqData<Claims>`.
#[derive(Clone, Copy)]
pub struct AuthMiddleware {
    public_reads: bool,
}

impl AuthMiddleware {
    /// Every request needs a valid token.
    pub fn required() -> Self {
        AuthMiddleware { public_reads: false }
    }

    /// GET/HEAD/OPTIONS go through without a valid token, anonymously.
    pub fn public_reads() -> Self {
        AuthMiddleware { public_reads: true }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service, public_reads: self.public_reads }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    public_reads: bool,
}

fn is_read(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let has_header = req.headers().contains_key("Authorization");

        let claims = match req.app_data::<web::Data<JwtConfig>>() {
            Some(config) => match bearer_token(&req) {
                Some(token) => config.verify_token(token),
                None if has_header => Err("Invalid token format".to_string()),
                None => Err("Missing authorization token".to_string()),
            },
            None => {
                log::error!("❌ JwtConfig not registered for {}", req.path());
                Err("Authentication is not configured".to_string())
            }
        };

        match claims {
            Ok(claims) => {
                log::debug!("🔑 {} {} as {}", req.method(), req.path(), claims.sub);
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await })
            }
            // Reads stay public even when the caller sends a stale token
            Err(e) if self.public_reads && is_read(req.method()) => {
                if has_header {
                    log::debug!("🔓 {} {} served anonymously: {}", req.method(), req.path(), e);
                }
                let fut = self.service.call(req);
                Box::pin(async move { fut.await })
            }
            Err(e) => {
                log::warn!("❌ {} {} rejected: {}", req.method(), req.path(), e);
                let err = Error::from(AppError::Unauthorized(e));
                Box::pin(async move { Err(err) })
            }
        }
    }
}
