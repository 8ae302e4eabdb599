pub mod answer;
pub mod common;
pub mod form;
pub mod question;
pub mod settings;
pub mod submission;
pub mod upload_file;
pub mod user;
pub mod vote;

pub use upload_file::{UploadedFile, UploadedFileCreate};
