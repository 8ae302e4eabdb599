use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;

use crate::context::UserInfo;
use crate::core::models::question::{Query as QuestionQuery, Question, QuestionCreate};
use crate::core::models::vote::Vote;
use crate::core::ports::repository::Manager;
use crate::core::services::question::{self, Saved};
use crate::core::services::vote::votes_of_question;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use crate::request::ListParams;
use crate::response::{List, Notice};

pub async fn create(user: UserInfo, Json(body): Json<QuestionCreate>, manager: Data<PgSqlxManager>) -> Result<HttpResponse, Error> {
    let tx = manager.tx().await?;
    let saved = question::create_question(tx, user.id, body).await?;
    Ok(HttpResponse::Created().json(saved))
}

pub async fn update(_: UserInfo, question_id: Path<(i32,)>, Json(body): Json<QuestionCreate>, manager: Data<PgSqlxManager>) -> Result<Json<Saved>, Error> {
    let tx = manager.tx().await?;
    Ok(Json(question::update_question(tx, question_id.into_inner().0, body).await?))
}

pub async fn detail(_: UserInfo, question_id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<Question>, Error> {
    let mut db = manager.db().await?;
    Ok(Json(question::question_detail(&mut db, question_id.into_inner().0).await?))
}

pub async fn list(_: UserInfo, Query(params): Query<ListParams>, manager: Data<PgSqlxManager>) -> Result<Json<List<Question>>, Error> {
    let mut db = manager.db().await?;
    let (questions, total) = question::query_questions(
        &mut db,
        QuestionQuery {
            status_eq: params.status,
            pagination: params.pagination()?,
        },
    )
    .await?;
    Ok(Json(List::new(questions, total)))
}

pub async fn delete(_: UserInfo, question_id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<Notice>, Error> {
    let id = question_id.into_inner().0;
    let mut db = manager.db().await?;
    question::delete_question(&mut db, id).await?;
    Ok(Json(Notice::new(format!("question {} deleted", id))))
}

pub async fn votes(_: UserInfo, question_id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<List<Vote>>, Error> {
    let mut db = manager.db().await?;
    let votes = votes_of_question(&mut db, question_id.into_inner().0).await?;
    let total = votes.len() as i64;
    Ok(Json(List::new(votes, total)))
}
