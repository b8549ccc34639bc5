//! Per-participant score records returned by the results collaborator.

use serde::{Deserialize, Serialize};

use crate::logging::warn;

/// Aggregated scores for one participant.
///
/// `scores` is indexed by judge slot; `None` marks a slot the judge has not
/// filled yet (a JSON `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub username: String,
    pub total_score: f64,
    #[serde(default)]
    pub scores: Vec<Option<f64>>,
    #[serde(default)]
    pub feedbacks: Vec<String>,
}

impl ScoreRecord {
    pub fn new(username: impl Into<String>, total_score: f64) -> Self {
        Self {
            id: None,
            username: username.into(),
            total_score,
            scores: Vec::new(),
            feedbacks: Vec::new(),
        }
    }

    pub fn with_scores(mut self, scores: impl IntoIterator<Item = Option<f64>>) -> Self {
        self.scores = scores.into_iter().collect();
        self
    }

    pub fn with_feedbacks<S: Into<String>>(mut self, feedbacks: impl IntoIterator<Item = S>) -> Self {
        self.feedbacks = feedbacks.into_iter().map(Into::into).collect();
        self
    }

    /// Score in judge slot `column`, if defined.
    pub fn score(&self, column: usize) -> Option<f64> {
        self.scores.get(column).copied().flatten()
    }
}

/// Extract score records from a results response.
///
/// Anything other than an array yields no records. Array elements that do
/// not have the record shape are dropped.
pub fn parse_records(value: serde_json::Value) -> Vec<ScoreRecord> {
    let serde_json::Value::Array(items) = value else {
        warn!("score response is not an array, treating as empty");
        return Vec::new();
    };

    let received = items.len();
    let records: Vec<ScoreRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    let skipped = received - records.len();
    if skipped > 0 {
        warn!(skipped, received, "dropped malformed score records");
    }
    records
}

/// Parse a results response body, degrading to no records on bad JSON.
pub fn parse_records_json(json: &str) -> Vec<ScoreRecord> {
    match serde_json::from_str(json) {
        Ok(value) => parse_records(value),
        Err(_) => {
            warn!("score response is not valid JSON, treating as empty");
            Vec::new()
        }
    }
}
