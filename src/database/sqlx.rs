use std::ops::DerefMut;

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery, Update as AnswerUpdate},
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question, Update as QuestionUpdate},
    settings::Settings,
    user::User,
    vote::{Insert as VoteInsert, Query as VoteQuery, Vote},
};
use crate::core::ports::repository::{AnswerCommon, Manager, QuestionCommon, SettingsCommon, Store, TxStore, UserCommon, VoteCommon};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, PgConnection, PgPool, Postgres, QueryBuilder, Transaction};

const QUESTION_COLUMNS: &str = "
    q.id, q.title, q.description, q.status, q.show_total_votes, q.owner_id, q.created_at, q.updated_at,
    ARRAY(SELECT qa.answer_id FROM question_answers AS qa WHERE qa.question_id = q.id ORDER BY qa.position) AS answer_ids,
    ARRAY(SELECT qv.vote_id FROM question_votes AS qv WHERE qv.question_id = q.id ORDER BY qv.position) AS vote_ids";

const ANSWER_COLUMNS: &str = "
    a.id, a.title, a.description, a.image_id, f.name AS image_name, a.status, a.owner_id, a.created_at, a.updated_at";

/// Repository adapter over either a pooled connection or an open transaction.
pub struct PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    fn conn(&mut self) -> &mut PgConnection {
        &mut self.executor
    }
}

impl<E> QuestionCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO questions (title, description, status, show_total_votes, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id",
        )
        .bind(question.title)
        .bind(question.description)
        .bind(question.status)
        .bind(question.show_total_votes)
        .bind(question.owner_id)
        .fetch_one(self.conn())
        .await?;
        Ok(id)
    }

    async fn update(&mut self, id: i32, question: QuestionUpdate) -> Result<u64, Error> {
        let res = query(
            "UPDATE questions
            SET title = $1, description = $2, status = $3, show_total_votes = $4, updated_at = NOW()
            WHERE id = $5",
        )
        .bind(question.title)
        .bind(question.description)
        .bind(question.status)
        .bind(question.show_total_votes)
        .bind(id)
        .execute(self.conn())
        .await?;
        Ok(res.rows_affected())
    }

    async fn get(&mut self, id: i32) -> Result<Option<Question>, Error> {
        let question = query_as(&format!("SELECT {} FROM questions AS q WHERE q.id = $1", QUESTION_COLUMNS))
            .bind(id)
            .fetch_optional(self.conn())
            .await?;
        Ok(question)
    }

    async fn query(&mut self, query: &QuestionQuery) -> Result<Vec<Question>, Error> {
        let questions = query_as(&format!(
            "SELECT {}
            FROM questions AS q
            WHERE ($1::BOOLEAN IS NULL OR q.status = $1)
            ORDER BY q.id
            LIMIT $2
            OFFSET $3",
            QUESTION_COLUMNS
        ))
        .bind(query.status_eq)
        .bind(query.pagination.map(|p| p.limit))
        .bind(query.pagination.and_then(|p| p.offset))
        .fetch_all(self.conn())
        .await?;
        Ok(questions)
    }

    async fn count(&mut self, query: &QuestionQuery) -> Result<i64, Error> {
        let total = query_scalar("SELECT COUNT(*) FROM questions WHERE ($1::BOOLEAN IS NULL OR status = $1)")
            .bind(query.status_eq)
            .fetch_one(self.conn())
            .await?;
        Ok(total)
    }

    async fn delete(&mut self, id: i32) -> Result<u64, Error> {
        let res = query("DELETE FROM questions WHERE id = $1").bind(id).execute(self.conn()).await?;
        Ok(res.rows_affected())
    }

    async fn exists_title(&mut self, title: &str, exclude_id: Option<i32>) -> Result<bool, Error> {
        let exists = query_scalar("SELECT EXISTS(SELECT * FROM questions WHERE title = $1 AND ($2::INT4 IS NULL OR id <> $2))")
            .bind(title)
            .bind(exclude_id)
            .fetch_one(self.conn())
            .await?;
        Ok(exists)
    }

    async fn set_answers(&mut self, id: i32, answer_ids: &[i32]) -> Result<(), Error> {
        query("DELETE FROM question_answers WHERE question_id = $1").bind(id).execute(self.conn()).await?;
        if answer_ids.is_empty() {
            return Ok(());
        }
        QueryBuilder::<Postgres>::new("INSERT INTO question_answers (question_id, answer_id, position)")
            .push_values(answer_ids.iter().enumerate(), |mut b, (position, &answer_id)| {
                b.push_bind(id);
                b.push_bind(answer_id);
                b.push_bind(position as i32);
            })
            .build()
            .execute(self.conn())
            .await?;
        Ok(())
    }

    async fn append_vote(&mut self, id: i32, vote_id: i32) -> Result<(), Error> {
        // The row lock taken by the update serializes concurrent appends to one question.
        let res = query("UPDATE questions SET updated_at = NOW() WHERE id = $1").bind(id).execute(self.conn()).await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound(format!("question {}", id)));
        }
        query(
            "INSERT INTO question_votes (question_id, vote_id, position)
            SELECT $1, $2, COALESCE(MAX(position) + 1, 0) FROM question_votes WHERE question_id = $1",
        )
        .bind(id)
        .bind(vote_id)
        .execute(self.conn())
        .await?;
        Ok(())
    }
}

impl<E> AnswerCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO answers (title, description, image_id, status, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id",
        )
        .bind(answer.title)
        .bind(answer.description)
        .bind(answer.image_id)
        .bind(answer.status)
        .bind(answer.owner_id)
        .fetch_one(self.conn())
        .await?;
        Ok(id)
    }

    async fn update(&mut self, id: i32, answer: AnswerUpdate) -> Result<u64, Error> {
        let res = query(
            "UPDATE answers
            SET title = $1, description = $2, image_id = $3, status = $4, updated_at = NOW()
            WHERE id = $5",
        )
        .bind(answer.title)
        .bind(answer.description)
        .bind(answer.image_id)
        .bind(answer.status)
        .bind(id)
        .execute(self.conn())
        .await?;
        Ok(res.rows_affected())
    }

    async fn get(&mut self, id: i32) -> Result<Option<Answer>, Error> {
        let answer = query_as(&format!(
            "SELECT {} FROM answers AS a LEFT JOIN uploaded_files AS f ON a.image_id = f.id WHERE a.id = $1",
            ANSWER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.conn())
        .await?;
        Ok(answer)
    }

    async fn query(&mut self, query: &AnswerQuery) -> Result<Vec<Answer>, Error> {
        let answers = query_as(&format!(
            "SELECT {}
            FROM answers AS a
            LEFT JOIN uploaded_files AS f ON a.image_id = f.id
            WHERE ($1::INT4[] IS NULL OR a.id = ANY($1))
                AND ($2::BOOLEAN IS NULL OR a.status = $2)
            ORDER BY a.id
            LIMIT $3
            OFFSET $4",
            ANSWER_COLUMNS
        ))
        .bind(&query.id_in)
        .bind(query.status_eq)
        .bind(query.pagination.map(|p| p.limit))
        .bind(query.pagination.and_then(|p| p.offset))
        .fetch_all(self.conn())
        .await?;
        Ok(answers)
    }

    async fn count(&mut self, query: &AnswerQuery) -> Result<i64, Error> {
        let total = query_scalar(
            "SELECT COUNT(*)
            FROM answers
            WHERE ($1::INT4[] IS NULL OR id = ANY($1))
                AND ($2::BOOLEAN IS NULL OR status = $2)",
        )
        .bind(&query.id_in)
        .bind(query.status_eq)
        .fetch_one(self.conn())
        .await?;
        Ok(total)
    }

    async fn delete(&mut self, id: i32) -> Result<u64, Error> {
        let res = query("DELETE FROM answers WHERE id = $1").bind(id).execute(self.conn()).await?;
        Ok(res.rows_affected())
    }

    async fn exists_title(&mut self, title: &str, exclude_id: Option<i32>) -> Result<bool, Error> {
        let exists = query_scalar("SELECT EXISTS(SELECT * FROM answers WHERE title = $1 AND ($2::INT4 IS NULL OR id <> $2))")
            .bind(title)
            .bind(exclude_id)
            .fetch_one(self.conn())
            .await?;
        Ok(exists)
    }

    async fn exists_image(&mut self, image_id: i32) -> Result<bool, Error> {
        let exists = query_scalar("SELECT EXISTS(SELECT * FROM uploaded_files WHERE id = $1)")
            .bind(image_id)
            .fetch_one(self.conn())
            .await?;
        Ok(exists)
    }
}

impl<E> VoteCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, vote: VoteInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO votes (title, score, answer_id, owner_id) VALUES ($1, $2, $3, $4) RETURNING id")
            .bind(vote.title)
            .bind(vote.score)
            .bind(vote.answer_id)
            .bind(vote.owner_id)
            .fetch_one(self.conn())
            .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Option<Vote>, Error> {
        let vote = query_as("SELECT * FROM votes WHERE id = $1").bind(id).fetch_optional(self.conn()).await?;
        Ok(vote)
    }

    async fn query(&mut self, query: &VoteQuery) -> Result<Vec<Vote>, Error> {
        let votes = match query.question_id_eq {
            Some(question_id) => {
                query_as(
                    "SELECT v.*
                    FROM question_votes AS qv
                    JOIN votes AS v ON qv.vote_id = v.id
                    WHERE qv.question_id = $1 AND ($2::INT4 IS NULL OR v.answer_id = $2)
                    ORDER BY qv.position",
                )
                .bind(question_id)
                .bind(query.answer_id_eq)
                .fetch_all(self.conn())
                .await?
            }
            None => {
                query_as("SELECT * FROM votes WHERE ($1::INT4 IS NULL OR answer_id = $1) ORDER BY id")
                    .bind(query.answer_id_eq)
                    .fetch_all(self.conn())
                    .await?
            }
        };
        Ok(votes)
    }
}

impl<E> SettingsCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn get(&mut self, name: &str) -> Result<Option<Settings>, Error> {
        let settings = query_as("SELECT deactivate_voting, deactivate_voting_per_question FROM settings WHERE name = $1")
            .bind(name)
            .fetch_optional(self.conn())
            .await?;
        Ok(settings)
    }

    async fn save(&mut self, name: &str, settings: &Settings) -> Result<(), Error> {
        query(
            "INSERT INTO settings (name, deactivate_voting, deactivate_voting_per_question)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE
            SET deactivate_voting = EXCLUDED.deactivate_voting,
                deactivate_voting_per_question = EXCLUDED.deactivate_voting_per_question",
        )
        .bind(name)
        .bind(settings.deactivate_voting)
        .bind(settings.deactivate_voting_per_question)
        .execute(self.conn())
        .await?;
        Ok(())
    }
}

impl<E> UserCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE username = $1").bind(username).fetch_optional(self.conn()).await?;
        Ok(user)
    }
}

impl<E> Store for PgSqlx<E> where E: DerefMut<Target = PgConnection> {}

impl TxStore for PgSqlx<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type TxStore = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        Ok(PgSqlx::new(self.pool.acquire().await?))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        Ok(PgSqlx::new(self.pool.begin().await?))
    }
}
