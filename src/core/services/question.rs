use log::{error, info};
use serde::Serialize;

use crate::core::models::question::{Insert as QuestionInsert, Query, Question, QuestionCreate, SaveOutcome, Update as QuestionUpdate};
use crate::core::ports::repository::{AnswerCommon, QuestionCommon, Store, TxStore};
use crate::error::Error;

#[derive(Debug, Serialize)]
pub struct Saved {
    pub id: i32,
    pub outcome: SaveOutcome,
    pub message: String,
}

async fn validate<S>(store: &mut S, question: &QuestionCreate, exclude_id: Option<i32>) -> Result<(), Error>
where
    S: Store,
{
    if question.title.trim().is_empty() {
        return Err(Error::BusinessError("title is required".into()));
    }
    if QuestionCommon::exists_title(store, &question.title, exclude_id).await? {
        return Err(Error::BusinessError(format!("a question titled {} already exists", question.title)));
    }
    for &answer_id in &question.answer_ids {
        if AnswerCommon::get(store, answer_id).await?.is_none() {
            return Err(Error::NotFound(format!("answer {}", answer_id)));
        }
    }
    Ok(())
}

pub async fn create_question<T>(mut store: T, owner_id: i32, question: QuestionCreate) -> Result<Saved, Error>
where
    T: TxStore,
{
    validate(&mut store, &question, None).await?;
    let id = QuestionCommon::insert(
        &mut store,
        QuestionInsert {
            title: question.title.clone(),
            description: question.description,
            status: question.status,
            show_total_votes: question.show_total_votes,
            owner_id,
        },
    )
    .await?;
    QuestionCommon::set_answers(&mut store, id, &question.answer_ids).await?;
    store.commit().await?;
    let outcome = SaveOutcome::Created;
    info!("{}", outcome.message(&question.title));
    Ok(Saved {
        id,
        outcome,
        message: outcome.message(&question.title),
    })
}

pub async fn update_question<T>(mut store: T, id: i32, question: QuestionCreate) -> Result<Saved, Error>
where
    T: TxStore,
{
    validate(&mut store, &question, Some(id)).await?;
    let written = QuestionCommon::update(
        &mut store,
        id,
        QuestionUpdate {
            title: question.title.clone(),
            description: question.description,
            status: question.status,
            show_total_votes: question.show_total_votes,
        },
    )
    .await?;
    match written {
        0 => return Err(Error::NotFound(format!("question {}", id))),
        1 => {}
        n => {
            error!("saving question {} wrote {} rows", id, n);
            return Err(Error::SaveFailed("question"));
        }
    }
    QuestionCommon::set_answers(&mut store, id, &question.answer_ids).await?;
    store.commit().await?;
    let outcome = SaveOutcome::Updated;
    info!("{}", outcome.message(&question.title));
    Ok(Saved {
        id,
        outcome,
        message: outcome.message(&question.title),
    })
}

pub async fn question_detail<S>(store: &mut S, id: i32) -> Result<Question, Error>
where
    S: Store,
{
    QuestionCommon::get(store, id).await?.ok_or_else(|| Error::NotFound(format!("question {}", id)))
}

pub async fn query_questions<S>(store: &mut S, query: Query) -> Result<(Vec<Question>, i64), Error>
where
    S: Store,
{
    let total = QuestionCommon::count(store, &query).await?;
    let questions = QuestionCommon::query(store, &query).await?;
    Ok((questions, total))
}

pub async fn delete_question<S>(store: &mut S, id: i32) -> Result<(), Error>
where
    S: Store,
{
    if QuestionCommon::delete(store, id).await? == 0 {
        return Err(Error::NotFound(format!("question {}", id)));
    }
    info!("question {} deleted", id);
    Ok(())
}
