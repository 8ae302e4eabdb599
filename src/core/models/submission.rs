use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Choice {
    pub answer_id: i32,
    #[serde(default)]
    pub score: Option<i32>,
}

/// Voting form payload keyed by question id. Iteration follows ascending question id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Submission(pub BTreeMap<i32, Choice>);

impl Submission {
    pub fn choice(&self, question_id: i32) -> Option<&Choice> {
        self.0.get(&question_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub vote_ids: Vec<i32>,
    pub message: &'static str,
    pub redirect: &'static str,
}
