use serde::Serialize;

use super::question::Question;

pub const RATING_SCORES: [i32; 5] = [1, 2, 3, 4, 5];

pub fn answer_field(question_id: i32) -> String {
    format!("answers_{}", question_id)
}

pub fn rating_field(question_id: i32) -> String {
    format!("vote_{}", question_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerOption {
    pub answer_id: i32,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerChoice {
    pub name: String,
    pub label: &'static str,
    pub required: bool,
    pub options: Vec<AnswerOption>,
    pub selected: Option<i32>,
}

/// The 1-5 rating radios. They stay hidden until the answer field named by
/// `revealed_by` changes.
#[derive(Debug, Clone, Serialize)]
pub struct RatingControl {
    pub name: String,
    pub label: &'static str,
    pub required: bool,
    pub options: Vec<i32>,
    pub visibility: Visibility,
    pub revealed_by: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionFieldset {
    pub question_id: i32,
    pub title: String,
    pub legend: String,
    pub answer: AnswerChoice,
    pub rating: Option<RatingControl>,
}

impl QuestionFieldset {
    pub fn new(question: &Question, options: Vec<AnswerOption>, with_rating: bool) -> Self {
        let answer_name = answer_field(question.id);
        let rating = with_rating.then(|| RatingControl {
            name: rating_field(question.id),
            label: "Vote this question:",
            required: false,
            options: RATING_SCORES.to_vec(),
            visibility: Visibility::Hidden,
            revealed_by: answer_name.clone(),
        });
        Self {
            question_id: question.id,
            title: question.title.clone(),
            legend: question.description.clone(),
            answer: AnswerChoice {
                name: answer_name,
                label: "Select an answer:",
                required: true,
                options,
                selected: None,
            },
            rating,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VotingForm {
    pub fieldsets: Vec<QuestionFieldset>,
    pub submit_label: &'static str,
}

impl VotingForm {
    pub fn new(fieldsets: Vec<QuestionFieldset>) -> Self {
        Self { fieldsets, submit_label: "Vote" }
    }

    /// Records an answer choice and reveals the rating control that depends on it.
    /// Returns false when the question or the answer is not part of the form.
    pub fn select_answer(&mut self, question_id: i32, answer_id: i32) -> bool {
        let Some(fieldset) = self.fieldsets.iter_mut().find(|f| f.question_id == question_id) else {
            return false;
        };
        if !fieldset.answer.options.iter().any(|o| o.answer_id == answer_id) {
            return false;
        }
        fieldset.answer.selected = Some(answer_id);
        if let Some(rating) = fieldset.rating.as_mut() {
            if rating.revealed_by == fieldset.answer.name {
                rating.visibility = Visibility::Visible;
            }
        }
        true
    }
}
