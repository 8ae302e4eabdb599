use actix_web::web::{Data, Json};

use crate::context::UserInfo;
use crate::core::models::settings::Settings;
use crate::core::ports::repository::Manager;
use crate::core::services::settings::{load_settings, save_settings};
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;

pub async fn detail(manager: Data<PgSqlxManager>) -> Result<Json<Settings>, Error> {
    let mut db = manager.db().await?;
    Ok(Json(load_settings(&mut db).await?))
}

pub async fn update(_: UserInfo, Json(settings): Json<Settings>, manager: Data<PgSqlxManager>) -> Result<Json<Settings>, Error> {
    let mut db = manager.db().await?;
    Ok(Json(save_settings(&mut db, settings).await?))
}
