use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery, Update as AnswerUpdate},
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question, Update as QuestionUpdate},
    settings::Settings,
    user::User,
    vote::{Insert as VoteInsert, Query as VoteQuery, Vote},
};
use crate::error::Error;

pub trait QuestionCommon {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error>;
    /// Returns the number of rows written.
    async fn update(&mut self, id: i32, question: QuestionUpdate) -> Result<u64, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Question>, Error>;
    async fn query(&mut self, query: &QuestionQuery) -> Result<Vec<Question>, Error>;
    async fn count(&mut self, query: &QuestionQuery) -> Result<i64, Error>;
    async fn delete(&mut self, id: i32) -> Result<u64, Error>;
    async fn exists_title(&mut self, title: &str, exclude_id: Option<i32>) -> Result<bool, Error>;
    async fn set_answers(&mut self, id: i32, answer_ids: &[i32]) -> Result<(), Error>;
    async fn append_vote(&mut self, id: i32, vote_id: i32) -> Result<(), Error>;
}

pub trait AnswerCommon {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error>;
    async fn update(&mut self, id: i32, answer: AnswerUpdate) -> Result<u64, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Answer>, Error>;
    async fn query(&mut self, query: &AnswerQuery) -> Result<Vec<Answer>, Error>;
    async fn count(&mut self, query: &AnswerQuery) -> Result<i64, Error>;
    async fn delete(&mut self, id: i32) -> Result<u64, Error>;
    async fn exists_title(&mut self, title: &str, exclude_id: Option<i32>) -> Result<bool, Error>;
    /// Whether `image_id` names an uploaded file.
    async fn exists_image(&mut self, image_id: i32) -> Result<bool, Error>;
}

pub trait VoteCommon {
    async fn insert(&mut self, vote: VoteInsert) -> Result<i32, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Vote>, Error>;
    /// With `question_id_eq` set, votes come back in the question's list order.
    async fn query(&mut self, query: &VoteQuery) -> Result<Vec<Vote>, Error>;
}

pub trait SettingsCommon {
    async fn get(&mut self, name: &str) -> Result<Option<Settings>, Error>;
    async fn save(&mut self, name: &str, settings: &Settings) -> Result<(), Error>;
}

pub trait UserCommon {
    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error>;
}

pub trait Common: QuestionCommon + AnswerCommon + VoteCommon + SettingsCommon + UserCommon {}

impl<T> Common for T where T: QuestionCommon + AnswerCommon + VoteCommon + SettingsCommon + UserCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type TxStore: TxStore;
    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
