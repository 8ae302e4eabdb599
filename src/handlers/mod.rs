pub mod answer;
pub mod question;
pub mod report;
pub mod settings;
pub mod upload;
pub mod vote;
pub mod voting;

use actix_web::{
    cookie::Cookie,
    http::StatusCode,
    web::{Data, Json},
    HttpResponse,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::ports::repository::Manager;
use crate::core::services::auth;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use crate::impls::tokener::jwt::JWT;
use crate::middlewares::jwt::JWT_TOKEN;

#[derive(Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(Json(Login { username, password }): Json<Login>, manager: Data<PgSqlxManager>, config: Data<Config>) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    let tokener = JWT::new(config.jwt_secret.clone());
    let token = auth::login(&mut db, &tokener, &username, &password).await?;
    Ok(HttpResponse::build(StatusCode::OK)
        .cookie(Cookie::build(JWT_TOKEN, token.clone()).path("/").http_only(true).finish())
        .json(LoginResponse { token }))
}
