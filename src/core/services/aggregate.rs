//! Per-question vote statistics shown in the listing. Every function is a pure
//! computation over the question's votes and is recomputed on each render.

use itertools::Itertools;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

use crate::core::models::{settings::Settings, vote::Vote};

pub const SCORE_BUCKETS: RangeInclusive<i32> = 1..=5;
pub const RESULT_HIDDEN: &str = "Result Hidden";

fn scores(votes: &[Vote]) -> impl Iterator<Item = i32> + '_ {
    votes.iter().filter_map(|v| {
        if v.score.is_none() {
            debug!("vote {} has no score, skipped", v.id);
        }
        v.score
    })
}

/// Mean of all present scores, two decimals; "0.00" when nothing was scored.
pub fn average_score(votes: &[Vote]) -> String {
    let (count, sum) = scores(votes).fold((0_i64, 0_i64), |(count, sum), s| (count + 1, sum + s as i64));
    let average = if count > 0 { sum as f64 / count as f64 } else { 0.0 };
    format!("{:.2}", average)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBucket {
    pub score: i32,
    pub votes: i64,
    pub percentage: f64,
}

impl fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Points {}, {} votes ({:.2}%)", self.score, self.votes, self.percentage)
    }
}

/// Buckets 1..=5. Scores outside that range still count toward the total the
/// percentages are taken over, but land in no bucket.
pub fn score_distribution(votes: &[Vote]) -> Vec<ScoreBucket> {
    let mut counts = [0_i64; 5];
    let mut total = 0_i64;
    for score in scores(votes) {
        total += 1;
        if SCORE_BUCKETS.contains(&score) {
            counts[(score - SCORE_BUCKETS.start()) as usize] += 1;
        }
    }
    SCORE_BUCKETS
        .zip(counts)
        .map(|(score, n)| ScoreBucket {
            score,
            votes: n,
            percentage: if total > 0 { n as f64 / total as f64 * 100.0 } else { 0.0 },
        })
        .collect()
}

pub fn render_distribution(votes: &[Vote]) -> String {
    score_distribution(votes).iter().join("\n")
}

pub fn total_votes(votes: &[Vote], settings: &Settings) -> String {
    if settings.deactivate_voting_per_question {
        return RESULT_HIDDEN.into();
    }
    scores(votes).count().to_string()
}
