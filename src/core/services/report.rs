use serde::Serialize;

use crate::core::models::question::{Query as QuestionQuery, Question};
use crate::core::models::settings::Settings;
use crate::core::models::vote::Query as VoteQuery;
use crate::core::ports::repository::{QuestionCommon, Store, VoteCommon};
use crate::error::Error;

use super::aggregate::{average_score, render_distribution, total_votes};
use super::question::question_detail;

/// One row of the voting-system listing.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionReport {
    pub id: i32,
    pub title: String,
    pub status: bool,
    pub average: String,
    pub distribution: String,
    pub total_votes: String,
}

pub async fn question_report<S>(store: &mut S, settings: &Settings, question: Question) -> Result<QuestionReport, Error>
where
    S: Store,
{
    let votes = VoteCommon::query(
        store,
        &VoteQuery {
            question_id_eq: Some(question.id),
            ..default::default()
        },
    )
    .await?;
    Ok(QuestionReport {
        id: question.id,
        title: question.title,
        status: question.status,
        average: average_score(&votes),
        distribution: render_distribution(&votes),
        total_votes: total_votes(&votes, settings),
    })
}

pub async fn report_of<S>(store: &mut S, settings: &Settings, question_id: i32) -> Result<QuestionReport, Error>
where
    S: Store,
{
    let question = question_detail(store, question_id).await?;
    question_report(store, settings, question).await
}

pub async fn reports<S>(store: &mut S, settings: &Settings, query: QuestionQuery) -> Result<(Vec<QuestionReport>, i64), Error>
where
    S: Store,
{
    let total = QuestionCommon::count(store, &query).await?;
    let questions = QuestionCommon::query(store, &query).await?;
    let mut rows = Vec::with_capacity(questions.len());
    for question in questions {
        rows.push(question_report(store, settings, question).await?);
    }
    Ok((rows, total))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::answer::Insert as AnswerInsert;
    use crate::core::models::question::Insert as QuestionInsert;
    use crate::core::models::submission::{Choice, Submission};
    use crate::core::ports::repository::AnswerCommon;
    use crate::core::services::aggregate::RESULT_HIDDEN;
    use crate::core::services::memory::MemoryStore;
    use crate::core::services::voting::submit;
    use std::collections::BTreeMap;

    async fn setup() -> (MemoryStore, i32, i32) {
        let mut store = MemoryStore::new();
        let image_id = store.add_file("a.png");
        let answer = AnswerCommon::insert(
            &mut store,
            AnswerInsert {
                title: "Yes".into(),
                description: String::new(),
                image_id,
                status: true,
                owner_id: 0,
            },
        )
        .await
        .unwrap();
        let question = QuestionCommon::insert(
            &mut store,
            QuestionInsert {
                title: "Agree?".into(),
                description: String::new(),
                status: true,
                show_total_votes: true,
                owner_id: 0,
            },
        )
        .await
        .unwrap();
        QuestionCommon::set_answers(&mut store, question, &[answer]).await.unwrap();
        (store, question, answer)
    }

    async fn vote(store: &MemoryStore, question: i32, answer: i32, score: Option<i32>) {
        let mut choices = BTreeMap::new();
        choices.insert(question, Choice { answer_id: answer, score });
        submit(store.begin(), 0, &Settings::default(), Submission(choices)).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_report() {
        let (mut store, question, _) = setup().await;
        let report = report_of(&mut store, &Settings::default(), question).await.unwrap();
        assert_eq!(report.average, "0.00");
        assert_eq!(report.total_votes, "0");
        assert!(report.distribution.lines().all(|l| l.ends_with("0 votes (0.00%)")));
    }

    #[tokio::test]
    async fn test_report_after_votes() {
        let (mut store, question, answer) = setup().await;
        for score in [Some(3), Some(3), Some(4), None] {
            vote(&store, question, answer, score).await;
        }
        let report = report_of(&mut store, &Settings::default(), question).await.unwrap();
        assert_eq!(report.title, "Agree?");
        assert_eq!(report.average, "3.33");
        assert_eq!(report.total_votes, "3");
        assert!(report.distribution.contains("Points 3, 2 votes (66.67%)"));
        assert!(report.distribution.contains("Points 4, 1 votes (33.33%)"));

        let again = report_of(&mut store, &Settings::default(), question).await.unwrap();
        assert_eq!(again.distribution, report.distribution);
    }

    #[tokio::test]
    async fn test_hidden_total() {
        let (mut store, question, answer) = setup().await;
        vote(&store, question, answer, Some(5)).await;
        let settings = Settings {
            deactivate_voting_per_question: true,
            ..Default::default()
        };
        let (rows, total) = reports(&mut store, &settings, QuestionQuery::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].total_votes, RESULT_HIDDEN);
        assert_eq!(rows[0].average, "5.00");
    }

    #[tokio::test]
    async fn test_missing_question() {
        let (mut store, _, _) = setup().await;
        assert!(matches!(report_of(&mut store, &Settings::default(), 404).await, Err(Error::NotFound(_))));
    }
}
