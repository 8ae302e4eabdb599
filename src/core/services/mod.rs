pub mod aggregate;
pub mod answer;
pub mod auth;
pub mod question;
pub mod report;
pub mod settings;
pub mod vote;
pub mod voting;

#[cfg(test)]
pub mod memory;
