//! In-memory implementation of the repository ports used by service tests.

use chrono::Utc;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery, Update as AnswerUpdate},
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question, Update as QuestionUpdate},
    settings::Settings,
    user::User,
    vote::{Insert as VoteInsert, Query as VoteQuery, Vote},
};
use crate::core::ports::repository::{AnswerCommon, QuestionCommon, SettingsCommon, Store, TxStore, UserCommon, VoteCommon};
use crate::error::Error;

#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    pub questions: BTreeMap<i32, Question>,
    pub answers: BTreeMap<i32, Answer>,
    pub votes: BTreeMap<i32, Vote>,
    pub settings: HashMap<String, Settings>,
    pub users: Vec<User>,
    pub files: HashMap<i32, String>,
    pub fail_append_vote: bool,
    pub duplicate_update: bool,
    next_id: i32,
}

impl MemoryData {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct MemoryStore {
    shared: Rc<RefCell<MemoryData>>,
    tx: Option<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(MemoryData::default())),
            tx: None,
        }
    }

    /// Starts a transaction that sees the current data and publishes its writes on commit.
    pub fn begin(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            tx: Some(self.shared.borrow().clone()),
        }
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&mut MemoryData) -> R) -> R {
        match self.tx.as_mut() {
            Some(data) => f(data),
            None => f(&mut self.shared.borrow_mut()),
        }
    }

    pub fn add_file(&mut self, name: &str) -> i32 {
        self.with(|d| {
            let id = d.next_id();
            d.files.insert(id, name.to_owned());
            id
        })
    }
}

fn paginate<T>(items: Vec<T>, pagination: Option<crate::core::models::common::Pagination>) -> Vec<T> {
    match pagination {
        Some(p) => items.into_iter().skip(p.offset.unwrap_or(0).max(0) as usize).take(p.limit.max(0) as usize).collect(),
        None => items,
    }
}

fn filter_questions(d: &MemoryData, query: &QuestionQuery) -> Vec<Question> {
    d.questions.values().filter(|q| query.status_eq.map_or(true, |s| q.status == s)).cloned().collect()
}

fn filter_answers(d: &MemoryData, query: &AnswerQuery) -> Vec<Answer> {
    d.answers
        .values()
        .filter(|a| query.id_in.as_ref().map_or(true, |ids| ids.contains(&a.id)))
        .filter(|a| query.status_eq.map_or(true, |s| a.status == s))
        .cloned()
        .collect()
}

impl QuestionCommon for MemoryStore {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error> {
        Ok(self.with(|d| {
            let id = d.next_id();
            d.questions.insert(
                id,
                Question {
                    id,
                    title: question.title,
                    description: question.description,
                    answer_ids: vec![],
                    vote_ids: vec![],
                    status: question.status,
                    show_total_votes: question.show_total_votes,
                    owner_id: question.owner_id,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
            );
            id
        }))
    }

    async fn update(&mut self, id: i32, question: QuestionUpdate) -> Result<u64, Error> {
        Ok(self.with(|d| {
            let duplicate = d.duplicate_update;
            match d.questions.get_mut(&id) {
                Some(q) => {
                    q.title = question.title;
                    q.description = question.description;
                    q.status = question.status;
                    q.show_total_votes = question.show_total_votes;
                    q.updated_at = Utc::now();
                    if duplicate {
                        2
                    } else {
                        1
                    }
                }
                None => 0,
            }
        }))
    }

    async fn get(&mut self, id: i32) -> Result<Option<Question>, Error> {
        Ok(self.with(|d| d.questions.get(&id).cloned()))
    }

    async fn query(&mut self, query: &QuestionQuery) -> Result<Vec<Question>, Error> {
        Ok(self.with(|d| paginate(filter_questions(d, query), query.pagination)))
    }

    async fn count(&mut self, query: &QuestionQuery) -> Result<i64, Error> {
        Ok(self.with(|d| filter_questions(d, query).len() as i64))
    }

    async fn delete(&mut self, id: i32) -> Result<u64, Error> {
        Ok(self.with(|d| d.questions.remove(&id).map_or(0, |_| 1)))
    }

    async fn exists_title(&mut self, title: &str, exclude_id: Option<i32>) -> Result<bool, Error> {
        Ok(self.with(|d| d.questions.values().any(|q| q.title == title && Some(q.id) != exclude_id)))
    }

    async fn set_answers(&mut self, id: i32, answer_ids: &[i32]) -> Result<(), Error> {
        self.with(|d| match d.questions.get_mut(&id) {
            Some(q) => {
                q.answer_ids = answer_ids.to_vec();
                Ok(())
            }
            None => Err(Error::DatabaseError(sqlx::Error::RowNotFound)),
        })
    }

    async fn append_vote(&mut self, id: i32, vote_id: i32) -> Result<(), Error> {
        self.with(|d| {
            if d.fail_append_vote {
                return Err(Error::DatabaseError(sqlx::Error::PoolClosed));
            }
            match d.questions.get_mut(&id) {
                Some(q) => {
                    q.vote_ids.push(vote_id);
                    q.updated_at = Utc::now();
                    Ok(())
                }
                None => Err(Error::DatabaseError(sqlx::Error::RowNotFound)),
            }
        })
    }
}

impl AnswerCommon for MemoryStore {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error> {
        Ok(self.with(|d| {
            let id = d.next_id();
            let image_name = d.files.get(&answer.image_id).cloned();
            d.answers.insert(
                id,
                Answer {
                    id,
                    title: answer.title,
                    description: answer.description,
                    image_id: answer.image_id,
                    image_name,
                    status: answer.status,
                    owner_id: answer.owner_id,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
            );
            id
        }))
    }

    async fn update(&mut self, id: i32, answer: AnswerUpdate) -> Result<u64, Error> {
        Ok(self.with(|d| {
            let image_name = d.files.get(&answer.image_id).cloned();
            match d.answers.get_mut(&id) {
                Some(a) => {
                    a.title = answer.title;
                    a.description = answer.description;
                    a.image_id = answer.image_id;
                    a.image_name = image_name;
                    a.status = answer.status;
                    a.updated_at = Utc::now();
                    1
                }
                None => 0,
            }
        }))
    }

    async fn get(&mut self, id: i32) -> Result<Option<Answer>, Error> {
        Ok(self.with(|d| d.answers.get(&id).cloned()))
    }

    async fn query(&mut self, query: &AnswerQuery) -> Result<Vec<Answer>, Error> {
        Ok(self.with(|d| paginate(filter_answers(d, query), query.pagination)))
    }

    async fn count(&mut self, query: &AnswerQuery) -> Result<i64, Error> {
        Ok(self.with(|d| filter_answers(d, query).len() as i64))
    }

    async fn delete(&mut self, id: i32) -> Result<u64, Error> {
        Ok(self.with(|d| {
            for q in d.questions.values_mut() {
                q.answer_ids.retain(|&a| a != id);
            }
            d.answers.remove(&id).map_or(0, |_| 1)
        }))
    }

    async fn exists_title(&mut self, title: &str, exclude_id: Option<i32>) -> Result<bool, Error> {
        Ok(self.with(|d| d.answers.values().any(|a| a.title == title && Some(a.id) != exclude_id)))
    }

    async fn exists_image(&mut self, image_id: i32) -> Result<bool, Error> {
        Ok(self.with(|d| d.files.contains_key(&image_id)))
    }
}

impl VoteCommon for MemoryStore {
    async fn insert(&mut self, vote: VoteInsert) -> Result<i32, Error> {
        Ok(self.with(|d| {
            let id = d.next_id();
            d.votes.insert(
                id,
                Vote {
                    id,
                    title: vote.title,
                    score: vote.score,
                    answer_id: vote.answer_id,
                    status: true,
                    owner_id: vote.owner_id,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
            );
            id
        }))
    }

    async fn get(&mut self, id: i32) -> Result<Option<Vote>, Error> {
        Ok(self.with(|d| d.votes.get(&id).cloned()))
    }

    async fn query(&mut self, query: &VoteQuery) -> Result<Vec<Vote>, Error> {
        Ok(self.with(|d| {
            let votes: Vec<Vote> = match query.question_id_eq {
                Some(qid) => d
                    .questions
                    .get(&qid)
                    .map(|q| q.vote_ids.iter().filter_map(|id| d.votes.get(id).cloned()).collect())
                    .unwrap_or_default(),
                None => d.votes.values().cloned().collect(),
            };
            votes.into_iter().filter(|v| query.answer_id_eq.map_or(true, |a| v.answer_id == a)).collect()
        }))
    }
}

impl SettingsCommon for MemoryStore {
    async fn get(&mut self, name: &str) -> Result<Option<Settings>, Error> {
        Ok(self.with(|d| d.settings.get(name).copied()))
    }

    async fn save(&mut self, name: &str, settings: &Settings) -> Result<(), Error> {
        self.with(|d| d.settings.insert(name.to_owned(), *settings));
        Ok(())
    }
}

impl UserCommon for MemoryStore {
    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error> {
        Ok(self.with(|d| d.users.iter().find(|u| u.username == username).cloned()))
    }
}

impl Store for MemoryStore {}

impl TxStore for MemoryStore {
    async fn commit(mut self) -> Result<(), Error> {
        if let Some(data) = self.tx.take() {
            *self.shared.borrow_mut() = data;
        }
        Ok(())
    }

    async fn rollback(mut self) -> Result<(), Error> {
        self.tx = None;
        Ok(())
    }
}
