use log::info;

use crate::core::models::answer::{Answer, AnswerCreate, Insert as AnswerInsert, Query, Update as AnswerUpdate};
use crate::core::models::vote::Query as VoteQuery;
use crate::core::ports::repository::{AnswerCommon, Store, VoteCommon};
use crate::error::Error;

async fn validate<S>(store: &mut S, answer: &AnswerCreate, exclude_id: Option<i32>) -> Result<(), Error>
where
    S: Store,
{
    if answer.title.trim().is_empty() {
        return Err(Error::BusinessError("title is required".into()));
    }
    if AnswerCommon::exists_title(store, &answer.title, exclude_id).await? {
        return Err(Error::BusinessError(format!("an answer titled {} already exists", answer.title)));
    }
    if !AnswerCommon::exists_image(store, answer.image_id).await? {
        return Err(Error::NotFound(format!("image {}", answer.image_id)));
    }
    Ok(())
}

pub async fn create_answer<S>(store: &mut S, owner_id: i32, answer: AnswerCreate) -> Result<i32, Error>
where
    S: Store,
{
    validate(store, &answer, None).await?;
    let id = AnswerCommon::insert(
        store,
        AnswerInsert {
            title: answer.title.clone(),
            description: answer.description,
            image_id: answer.image_id,
            status: answer.status,
            owner_id,
        },
    )
    .await?;
    info!("New answer {} has been created.", answer.title);
    Ok(id)
}

pub async fn update_answer<S>(store: &mut S, id: i32, answer: AnswerCreate) -> Result<(), Error>
where
    S: Store,
{
    validate(store, &answer, Some(id)).await?;
    let written = AnswerCommon::update(
        store,
        id,
        AnswerUpdate {
            title: answer.title.clone(),
            description: answer.description,
            image_id: answer.image_id,
            status: answer.status,
        },
    )
    .await?;
    if written == 0 {
        return Err(Error::NotFound(format!("answer {}", id)));
    }
    info!("The answer {} has been updated.", answer.title);
    Ok(())
}

pub async fn answer_detail<S>(store: &mut S, id: i32) -> Result<Answer, Error>
where
    S: Store,
{
    AnswerCommon::get(store, id).await?.ok_or_else(|| Error::NotFound(format!("answer {}", id)))
}

pub async fn query_answers<S>(store: &mut S, query: Query) -> Result<(Vec<Answer>, i64), Error>
where
    S: Store,
{
    let total = AnswerCommon::count(store, &query).await?;
    let answers = AnswerCommon::query(store, &query).await?;
    Ok((answers, total))
}

/// Active answers among `ids`, in the order of `ids`.
pub async fn active_answers_in_order<S>(store: &mut S, ids: &[i32]) -> Result<Vec<Answer>, Error>
where
    S: Store,
{
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let mut answers = AnswerCommon::query(
        store,
        &Query {
            id_in: Some(ids.to_vec()),
            status_eq: Some(true),
            ..default::default()
        },
    )
    .await?;
    answers.sort_by_key(|a| ids.iter().position(|&id| id == a.id));
    Ok(answers)
}

/// Answers that votes point at cannot be removed.
pub async fn delete_answer<S>(store: &mut S, id: i32) -> Result<(), Error>
where
    S: Store,
{
    let votes = VoteCommon::query(
        store,
        &VoteQuery {
            answer_id_eq: Some(id),
            ..default::default()
        },
    )
    .await?;
    if !votes.is_empty() {
        return Err(Error::BusinessError(format!("answer {} has {} votes", id, votes.len())));
    }
    if AnswerCommon::delete(store, id).await? == 0 {
        return Err(Error::NotFound(format!("answer {}", id)));
    }
    info!("answer {} deleted", id);
    Ok(())
}
