//! Ranked, view-ready leaderboard built from score records.

use serde::{Deserialize, Serialize};

use crate::ledger::EMPTY_FEEDBACK;
use crate::logging::debug;

use super::record::{ScoreRecord, parse_records, parse_records_json};
use super::tier::{PodiumTier, Tier, TierThresholds};

/// Label shown for feedback that is empty or the `"empty"` sentinel.
pub const NO_FEEDBACK: &str = "No feedback";

/// Presentation settings for a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingPolicy {
    #[serde(flatten)]
    pub thresholds: TierThresholds,
    pub no_feedback_label: String,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::DEFAULT,
            no_feedback_label: NO_FEEDBACK.to_string(),
        }
    }
}

/// Stable sort by `total_score`, highest first. Ties keep input order.
///
/// `-0.0` and `0.0` compare equal.
pub fn rank(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| sort_key(b.total_score).total_cmp(&sort_key(a.total_score)));
    sorted
}

/// Folds `-0.0` into `0.0` so `total_cmp` treats them as a tie.
fn sort_key(score: f64) -> f64 {
    score + 0.0
}

/// Highest defined score in each judge column.
///
/// There are as many columns as the longest `scores` list. A column where
/// no record has a defined score yields `0.0`.
pub fn column_maxima(records: &[ScoreRecord]) -> Vec<f64> {
    let columns = records.iter().map(|r| r.scores.len()).max().unwrap_or(0);
    (0..columns)
        .map(|column| {
            records
                .iter()
                .filter_map(|r| r.score(column))
                .reduce(f64::max)
                .unwrap_or(0.0)
        })
        .collect()
}

/// Whether `record` holds the best score of `column`.
pub fn is_column_best(record: &ScoreRecord, column: usize, maxima: &[f64]) -> bool {
    match (record.score(column), maxima.get(column)) {
        (Some(score), Some(max)) => score == *max,
        _ => false,
    }
}

/// Display text for one feedback entry.
pub fn display_feedback<'a>(feedback: &'a str, no_feedback_label: &'a str) -> &'a str {
    if feedback.is_empty() || feedback == EMPTY_FEEDBACK {
        no_feedback_label
    } else {
        feedback
    }
}

/// Feedback entries of `record` as they should be displayed.
pub fn feedback_for(record: &ScoreRecord) -> Vec<&str> {
    record
        .feedbacks
        .iter()
        .map(|f| display_feedback(f, NO_FEEDBACK))
        .collect()
}

/// One judge slot in a leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCell {
    pub score: Option<f64>,
    pub tier: Tier,
    /// This is the highest score in the column.
    pub best: bool,
}

/// A sorted record with its presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based position.
    pub position: usize,
    pub podium: PodiumTier,
    pub username: String,
    pub total_score: f64,
    /// Exactly one cell per leaderboard column.
    pub cells: Vec<ScoreCell>,
    pub feedback: Vec<String>,
}

/// Serializable snapshot of a whole leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardReport {
    pub columns: usize,
    pub column_maxima: Vec<f64>,
    pub rows: Vec<LeaderboardRow>,
}

/// Records sorted for display, with the derived column maxima.
///
/// Always rebuilt from source records; never edited in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
    column_maxima: Vec<f64>,
    policy: RankingPolicy,
}

impl Leaderboard {
    pub fn new(records: &[ScoreRecord]) -> Self {
        Self::with_policy(records, RankingPolicy::default())
    }

    pub fn with_policy(records: &[ScoreRecord], policy: RankingPolicy) -> Self {
        let records = rank(records);
        let column_maxima = column_maxima(&records);
        debug!(
            records = records.len(),
            columns = column_maxima.len(),
            "leaderboard built"
        );
        Self {
            records,
            column_maxima,
            policy,
        }
    }

    /// Build from a results response; malformed shapes give an empty board.
    pub fn from_value(value: serde_json::Value, policy: RankingPolicy) -> Self {
        Self::with_policy(&parse_records(value), policy)
    }

    /// Build from a results response body; invalid JSON gives an empty board.
    pub fn from_json(json: &str, policy: RankingPolicy) -> Self {
        Self::with_policy(&parse_records_json(json), policy)
    }

    /// Records in ranked order.
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn column_maxima(&self) -> &[f64] {
        &self.column_maxima
    }

    pub fn column_count(&self) -> usize {
        self.column_maxima.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Top-ranked record.
    pub fn winner(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    pub fn is_column_best(&self, record: &ScoreRecord, column: usize) -> bool {
        is_column_best(record, column, &self.column_maxima)
    }

    pub fn classify(&self, score: Option<f64>) -> Tier {
        self.policy.thresholds.classify(score)
    }

    /// View-ready rows in ranked order.
    pub fn rows(&self) -> Vec<LeaderboardRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| self.row(index, record))
            .collect()
    }

    pub fn report(&self) -> LeaderboardReport {
        LeaderboardReport {
            columns: self.column_count(),
            column_maxima: self.column_maxima.clone(),
            rows: self.rows(),
        }
    }

    fn row(&self, index: usize, record: &ScoreRecord) -> LeaderboardRow {
        let cells = (0..self.column_count())
            .map(|column| {
                let score = record.score(column);
                ScoreCell {
                    score,
                    tier: self.classify(score),
                    best: self.is_column_best(record, column),
                }
            })
            .collect();

        let feedback = record
            .feedbacks
            .iter()
            .map(|f| display_feedback(f, &self.policy.no_feedback_label).to_string())
            .collect();

        LeaderboardRow {
            position: index + 1,
            podium: PodiumTier::from_rank(index),
            username: record.username.clone(),
            total_score: record.total_score,
            cells,
            feedback,
        }
    }
}
