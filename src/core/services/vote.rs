use crate::core::models::vote::{Query as VoteQuery, Vote};
use crate::core::ports::repository::{Store, VoteCommon};
use crate::error::Error;

use super::question::question_detail;

pub async fn vote_detail<S>(store: &mut S, id: i32) -> Result<Vote, Error>
where
    S: Store,
{
    VoteCommon::get(store, id).await?.ok_or_else(|| Error::NotFound(format!("vote {}", id)))
}

/// Votes referenced by a question, in the order they were appended.
pub async fn votes_of_question<S>(store: &mut S, question_id: i32) -> Result<Vec<Vote>, Error>
where
    S: Store,
{
    question_detail(store, question_id).await?;
    VoteCommon::query(
        store,
        &VoteQuery {
            question_id_eq: Some(question_id),
            ..default::default()
        },
    )
    .await
}
