use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::Pagination;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Answer {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image_id: i32,
    pub image_name: Option<String>,
    pub status: bool,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_id: i32,
    #[serde(default = "enabled")]
    pub status: bool,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub title: String,
    pub description: String,
    pub image_id: i32,
    pub status: bool,
    pub owner_id: i32,
}

#[derive(Debug, Clone)]
pub struct Update {
    pub title: String,
    pub description: String,
    pub image_id: i32,
    pub status: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub id_in: Option<Vec<i32>>,
    pub status_eq: Option<bool>,
    pub pagination: Option<Pagination>,
}
