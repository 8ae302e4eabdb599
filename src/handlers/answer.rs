use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;

use crate::context::UserInfo;
use crate::core::models::answer::{Answer, AnswerCreate, Query as AnswerQuery};
use crate::core::ports::repository::Manager;
use crate::core::services::answer;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use crate::request::ListParams;
use crate::response::{CreateResponse, List, Notice};

pub async fn create(user: UserInfo, Json(body): Json<AnswerCreate>, manager: Data<PgSqlxManager>) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    let id = answer::create_answer(&mut db, user.id, body).await?;
    Ok(HttpResponse::Created().json(CreateResponse { id }))
}

pub async fn update(_: UserInfo, answer_id: Path<(i32,)>, Json(body): Json<AnswerCreate>, manager: Data<PgSqlxManager>) -> Result<Json<Notice>, Error> {
    let title = body.title.clone();
    let mut db = manager.db().await?;
    answer::update_answer(&mut db, answer_id.into_inner().0, body).await?;
    Ok(Json(Notice::new(format!("The answer {} has been updated.", title))))
}

pub async fn detail(_: UserInfo, answer_id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<Answer>, Error> {
    let mut db = manager.db().await?;
    Ok(Json(answer::answer_detail(&mut db, answer_id.into_inner().0).await?))
}

pub async fn list(_: UserInfo, Query(params): Query<ListParams>, manager: Data<PgSqlxManager>) -> Result<Json<List<Answer>>, Error> {
    let mut db = manager.db().await?;
    let (answers, total) = answer::query_answers(
        &mut db,
        AnswerQuery {
            status_eq: params.status,
            pagination: params.pagination()?,
            ..default::default()
        },
    )
    .await?;
    Ok(Json(List::new(answers, total)))
}

pub async fn delete(_: UserInfo, answer_id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<Notice>, Error> {
    let id = answer_id.into_inner().0;
    let mut db = manager.db().await?;
    answer::delete_answer(&mut db, id).await?;
    Ok(Json(Notice::new(format!("answer {} deleted", id))))
}
