use actix_web::web::{Data, Json, Path, Query};

use crate::core::models::question::Query as QuestionQuery;
use crate::core::ports::repository::Manager;
use crate::core::services::report::{report_of, reports, QuestionReport};
use crate::core::services::settings::load_settings;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use crate::request::ListParams;
use crate::response::List;

pub async fn list(Query(params): Query<ListParams>, manager: Data<PgSqlxManager>) -> Result<Json<List<QuestionReport>>, Error> {
    let mut db = manager.db().await?;
    let settings = load_settings(&mut db).await?;
    let (rows, total) = reports(
        &mut db,
        &settings,
        QuestionQuery {
            status_eq: params.status,
            pagination: params.pagination()?,
        },
    )
    .await?;
    Ok(Json(List::new(rows, total)))
}

pub async fn detail(question_id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<QuestionReport>, Error> {
    let mut db = manager.db().await?;
    let settings = load_settings(&mut db).await?;
    Ok(Json(report_of(&mut db, &settings, question_id.into_inner().0).await?))
}
