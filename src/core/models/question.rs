use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::Pagination;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub answer_ids: Vec<i32>,
    pub vote_ids: Vec<i32>,
    pub status: bool,
    pub show_total_votes: bool,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn enabled() -> bool {
    true
}

/// Body of the create and edit forms.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub answer_ids: Vec<i32>,
    #[serde(default = "enabled")]
    pub status: bool,
    #[serde(default = "enabled")]
    pub show_total_votes: bool,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub title: String,
    pub description: String,
    pub status: bool,
    pub show_total_votes: bool,
    pub owner_id: i32,
}

#[derive(Debug, Clone)]
pub struct Update {
    pub title: String,
    pub description: String,
    pub status: bool,
    pub show_total_votes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub status_eq: Option<bool>,
    pub pagination: Option<Pagination>,
}

/// Result of saving a question through the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn message(&self, title: &str) -> String {
        match self {
            SaveOutcome::Created => format!("New question {} has been created.", title),
            SaveOutcome::Updated => format!("The question {} has been updated.", title),
        }
    }
}
