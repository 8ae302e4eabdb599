use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vote {
    pub id: i32,
    pub title: String,
    pub score: Option<i32>,
    pub answer_id: i32,
    pub status: bool,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub title: String,
    pub score: Option<i32>,
    pub answer_id: i32,
    pub owner_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub question_id_eq: Option<i32>,
    pub answer_id_eq: Option<i32>,
}
