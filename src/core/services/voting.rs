use log::{info, warn};

use crate::core::models::form::{AnswerOption, QuestionFieldset, VotingForm, RATING_SCORES};
use crate::core::models::question::Query as QuestionQuery;
use crate::core::models::settings::Settings;
use crate::core::models::submission::{Submission, SubmitOutcome};
use crate::core::models::vote::Insert as VoteInsert;
use crate::core::ports::repository::{AnswerCommon, QuestionCommon, Store, TxStore, VoteCommon};
use crate::core::uploader::FileUrlGenerator;
use crate::error::Error;

use super::answer::active_answers_in_order;

pub const VOTE_SUBMITTED: &str = "The vote has been submitted.";
pub const LISTING_PATH: &str = "/voting-system";

pub fn vote_title(question_id: i32) -> String {
    format!("Vote for Question {}", question_id)
}

fn active_questions() -> QuestionQuery {
    QuestionQuery {
        status_eq: Some(true),
        ..default::default()
    }
}

/// One fieldset per active question, in id order. The rating control is left
/// out entirely while voting is deactivated.
pub async fn build_form<S, U>(store: &mut S, settings: &Settings, urls: &U) -> Result<VotingForm, Error>
where
    S: Store,
    U: FileUrlGenerator,
{
    let questions = QuestionCommon::query(store, &active_questions()).await?;
    let mut fieldsets = Vec::with_capacity(questions.len());
    for question in &questions {
        let options = active_answers_in_order(store, &question.answer_ids)
            .await?
            .into_iter()
            .map(|a| AnswerOption {
                answer_id: a.id,
                image_url: a.image_name.as_deref().map(|name| urls.generate_absolute(name)),
                title: a.title,
                description: a.description,
            })
            .collect();
        fieldsets.push(QuestionFieldset::new(question, options, !settings.deactivate_voting));
    }
    Ok(VotingForm::new(fieldsets))
}

/// Records one vote per answered question and links it to that question. All
/// writes share the transaction in `store`; nothing is visible until commit.
pub async fn submit<T>(mut store: T, owner_id: i32, settings: &Settings, submission: Submission) -> Result<SubmitOutcome, Error>
where
    T: TxStore,
{
    for question in QuestionCommon::query(&mut store, &active_questions()).await? {
        if submission.choice(question.id).is_none() {
            return Err(Error::BusinessError(format!("an answer is required for question {}", question.id)));
        }
    }
    let mut vote_ids = Vec::new();
    for (question_id, choice) in submission.0 {
        let question = QuestionCommon::get(&mut store, question_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("question {}", question_id)))?;
        if !question.status {
            return Err(Error::BusinessError(format!("question {} is not open for voting", question_id)));
        }
        if AnswerCommon::get(&mut store, choice.answer_id).await?.is_none() {
            return Err(Error::NotFound(format!("answer {}", choice.answer_id)));
        }
        if !question.answer_ids.contains(&choice.answer_id) {
            warn!("answer {} is not linked to question {}", choice.answer_id, question_id);
        }
        if settings.deactivate_voting {
            continue;
        }
        if let Some(score) = choice.score {
            if !RATING_SCORES.contains(&score) {
                return Err(Error::BusinessError(format!("score {} for question {} is out of range", score, question_id)));
            }
        }
        let vote_id = VoteCommon::insert(
            &mut store,
            VoteInsert {
                title: vote_title(question_id),
                score: choice.score,
                answer_id: choice.answer_id,
                owner_id,
            },
        )
        .await?;
        QuestionCommon::append_vote(&mut store, question_id, vote_id).await?;
        info!("vote {} recorded for question {}", vote_id, question_id);
        vote_ids.push(vote_id);
    }
    store.commit().await?;
    Ok(SubmitOutcome {
        vote_ids,
        message: VOTE_SUBMITTED,
        redirect: LISTING_PATH,
    })
}
