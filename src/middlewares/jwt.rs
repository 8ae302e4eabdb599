use actix_web::{
    dev::{Service, ServiceRequest, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::debug;

use crate::context::UserInfo;
use crate::core::tokener::{Claim, Payload, Tokener};
use crate::impls::tokener::jwt::JWT;

pub static JWT_TOKEN: &str = "JWT_TOKEN";

/// Resolves the caller from an `Authorization` header or the `JWT_TOKEN` cookie.
/// Requests without a valid token pass through anonymously; editor-only handlers
/// reject them through the `UserInfo` extractor.
pub struct JWTMiddleware {
    secret: Vec<u8>,
}

impl JWTMiddleware {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for JWTMiddleware
where
    S: Service<ServiceRequest> + 'static,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Error = Error;
    type Response = S::Response;
    type Transform = JWTService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JWTService {
            tokener: JWT::new(self.secret.clone()),
            next_service: service,
        }))
    }
}

pub struct JWTService<S> {
    tokener: JWT,
    next_service: S,
}

fn token_of(req: &ServiceRequest) -> Option<String> {
    if let Some(header) = req.headers().get("Authorization") {
        let value = header.to_str().unwrap_or_default().trim();
        return Some(value.strip_prefix("Bearer ").unwrap_or(value).to_owned());
    }
    req.cookie(JWT_TOKEN).map(|c| c.value().to_owned())
}

impl<S> Service<ServiceRequest> for JWTService<S>
where
    S: Service<ServiceRequest>,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Response = S::Response;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx).map_err(|e| e.into())
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = token_of(&req) {
            match <JWT as Tokener<Claim>>::verify_token(&self.tokener, &token) {
                Err(e) => debug!("ignoring token: {}", e),
                Ok(claim) => match claim.user().parse::<i32>() {
                    Err(e) => debug!("ignoring token for user {}: {}", claim.user(), e),
                    Ok(id) => {
                        req.extensions_mut().insert(UserInfo { id });
                    }
                },
            }
        }

        let res_fut = self.next_service.call(req);
        Box::pin(async move {
            let resp = res_fut.await.map_err(|e| e.into())?;
            Ok(resp)
        })
    }
}
