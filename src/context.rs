use actix_web::{Error, FromRequest, HttpMessage};
use crate::core::models::common::owner_or_anonymous;
use std::future::{ready, Ready};

/// The authenticated editor, placed in the request extensions by the JWT middleware.
/// Handlers that take it directly are editor-only; `Option<UserInfo>` accepts anonymous callers.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: i32,
}

impl FromRequest for UserInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<Self>() {
            ready(Ok(user.clone()))
        } else {
            ready(Err(actix_web::error::ErrorUnauthorized("login required")))
        }
    }
}

pub fn owner_id(user: &Option<UserInfo>) -> i32 {
    owner_or_anonymous(user.as_ref().map(|u| u.id))
}
