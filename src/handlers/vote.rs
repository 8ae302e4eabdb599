use actix_web::web::{Data, Json, Path};

use crate::context::UserInfo;
use crate::core::models::vote::Vote;
use crate::core::ports::repository::Manager;
use crate::core::services::vote::vote_detail;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;

pub async fn detail(_: UserInfo, vote_id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<Vote>, Error> {
    let mut db = manager.db().await?;
    Ok(Json(vote_detail(&mut db, vote_id.into_inner().0).await?))
}
