//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::result::Result;

use pollscore::prelude::*;

// =============================================================================
// Documents
// =============================================================================

/// Competition document in the wrapped shape the backend returns.
pub const COMPETITION_JSON: &str = r#"{
    "competitions": {
        "id": 12,
        "title": "C4 Demo Day",
        "desc": "Final pitches",
        "max_score": 1000,
        "participants": [
            {"id": 1, "user_id": 101, "username": "finuaz"},
            {"id": 2, "user_id": 102, "username": "pojan"},
            {"id": 3, "user_id": 103, "username": "olenter"},
            {"id": 4, "user_id": 104, "username": "bintang"}
        ]
    }
}"#;

/// Results document with an unscored slot and sentinel feedback.
pub const SCORES_JSON: &str = r#"[
    {"username": "pojan", "total_score": 700, "scores": [400, 300], "feedbacks": ["clear", "empty"]},
    {"username": "finuaz", "total_score": 900, "scores": [500, 400], "feedbacks": ["great", "bold"]},
    {"username": "olenter", "total_score": 400, "scores": [100, 300], "feedbacks": ["", "ok"]},
    {"username": "bintang", "total_score": 0, "scores": [null], "feedbacks": []}
]"#;

/// Poll overview: competition 12 is still open, 7 was already voted on.
pub const MY_POLLS_JSON: &str = r#"{
    "voted": [{"id": 7, "title": "Autumn cup", "desc": "Closed", "creator_id": 2}],
    "not_voted": [{"id": 12, "title": "C4 Demo Day", "desc": "Final pitches", "creator_id": 2}]
}"#;

// =============================================================================
// Builders
// =============================================================================

pub fn participants(ids: &[u64]) -> Vec<Participant> {
    ids.iter()
        .map(|id| Participant::new(*id, format!("user-{id}")))
        .collect()
}

pub fn competition(budget: u32, ids: &[u64]) -> Competition {
    Competition {
        id: Some(1),
        title: "Test".to_string(),
        description: String::new(),
        max_score: Some(budget),
        participants: participants(ids),
    }
}

pub fn record(name: &str, total: f64, scores: &[Option<f64>]) -> ScoreRecord {
    ScoreRecord::new(name, total).with_scores(scores.iter().copied())
}

// =============================================================================
// Scripted backend
// =============================================================================

/// Backend whose responses are queued up front; every call is recorded.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    pub competitions: VecDeque<Result<Competition, TransportError>>,
    pub submit_results: VecDeque<Result<(), TransportError>>,
    pub score_responses: VecDeque<Result<serde_json::Value, TransportError>>,
    pub my_polls: VecDeque<Result<MyPolls, TransportError>>,
    pub submitted: Vec<Submission>,
    pub submit_calls: usize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_competition(mut self, response: Result<Competition, TransportError>) -> Self {
        self.competitions.push_back(response);
        self
    }

    pub fn with_submit(mut self, response: Result<(), TransportError>) -> Self {
        self.submit_results.push_back(response);
        self
    }

    pub fn with_scores(mut self, response: Result<serde_json::Value, TransportError>) -> Self {
        self.score_responses.push_back(response);
        self
    }

    pub fn with_my_polls(mut self, response: Result<MyPolls, TransportError>) -> Self {
        self.my_polls.push_back(response);
        self
    }
}

impl Backend for ScriptedBackend {
    fn fetch_competition(&mut self, _competition_id: u64) -> Result<Competition, TransportError> {
        self.competitions
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("fetch_competition", "no response queued")))
    }

    fn submit_polls(
        &mut self,
        _competition_id: u64,
        submission: &Submission,
    ) -> Result<(), TransportError> {
        self.submit_calls += 1;
        let result = self
            .submit_results
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("submit_polls", "no response queued")));
        if result.is_ok() {
            self.submitted.push(submission.clone());
        }
        result
    }

    fn fetch_scores(&mut self, _competition_id: u64) -> Result<serde_json::Value, TransportError> {
        self.score_responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("fetch_scores", "no response queued")))
    }

    fn fetch_my_polls(&mut self) -> Result<MyPolls, TransportError> {
        self.my_polls
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("fetch_my_polls", "no response queued")))
    }
}
