//! Judge session: ties the ledger and ranker to the backend collaborators.
//!
//! The backend is reached through the [`Backend`] trait so the crate never
//! owns a transport. Calls are synchronous and take `&mut self`, so only one
//! request per session can be in flight and a stale response can never
//! overwrite a newer snapshot.

use thiserror::Error;

use crate::ledger::{
    AllocationLedger, Competition, JudgeContext, LedgerError, LedgerPolicy, MyPolls, PollStatus,
    Submission,
};
use crate::logging::{info, warn};
use crate::ranker::{Leaderboard, RankingPolicy};

/// A collaborator call that did not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct TransportError {
    /// Which call failed, e.g. `"fetch_competition"`.
    pub operation: &'static str,
    pub message: String,
}

impl TransportError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// The external service holding competitions, polls and results.
pub trait Backend {
    /// Fetch the competition snapshot, including its participants.
    fn fetch_competition(&mut self, competition_id: u64) -> Result<Competition, TransportError>;

    /// Deliver a finalized allocation. Called at most once per submit.
    fn submit_polls(
        &mut self,
        competition_id: u64,
        submission: &Submission,
    ) -> Result<(), TransportError>;

    /// Fetch aggregated results. The raw JSON is returned so that a
    /// malformed shape can degrade instead of failing.
    fn fetch_scores(&mut self, competition_id: u64) -> Result<serde_json::Value, TransportError>;

    /// Fetch the acting judge's competitions, split into voted and not voted.
    fn fetch_my_polls(&mut self) -> Result<MyPolls, TransportError>;
}

/// Failure of a session step. Session state is unchanged when returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] LedgerError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Competition has not been loaded")]
    NotLoaded,
}

/// One judge working on one competition.
#[derive(Debug)]
pub struct PollSession<B> {
    backend: B,
    competition_id: u64,
    judge: JudgeContext,
    ledger_policy: LedgerPolicy,
    ranking_policy: RankingPolicy,
    competition: Option<Competition>,
    ledger: Option<AllocationLedger>,
}

impl<B: Backend> PollSession<B> {
    pub fn new(backend: B, competition_id: u64, judge: JudgeContext) -> Self {
        Self {
            backend,
            competition_id,
            judge,
            ledger_policy: LedgerPolicy::default(),
            ranking_policy: RankingPolicy::default(),
            competition: None,
            ledger: None,
        }
    }

    pub fn with_ledger_policy(mut self, policy: LedgerPolicy) -> Self {
        self.ledger_policy = policy;
        self
    }

    pub fn with_ranking_policy(mut self, policy: RankingPolicy) -> Self {
        self.ranking_policy = policy;
        self
    }

    /// Fetch the competition and seed or merge the ledger.
    ///
    /// The first successful load creates the ledger. Later loads only add
    /// participants that are new, so in-progress edits survive a refetch;
    /// the budget follows the latest `max_score`. On failure nothing changes.
    pub fn load(&mut self) -> Result<&AllocationLedger, SessionError> {
        let competition = self
            .backend
            .fetch_competition(self.competition_id)
            .inspect_err(|_| {
                warn!(competition = self.competition_id, "competition fetch failed");
            })?;

        let excluded = self.judge.excluded(&self.ledger_policy);
        let budget = competition.budget(self.ledger_policy.default_budget);
        if let Some(ledger) = self.ledger.as_mut() {
            ledger.set_budget(budget)?;
            ledger.merge_participants(&competition.participants, excluded);
        } else {
            self.ledger = Some(AllocationLedger::initialize(
                &competition.participants,
                excluded,
                budget,
            )?);
        }
        self.competition = Some(competition);

        let ledger = self.ledger.as_ref().ok_or(SessionError::NotLoaded)?;
        info!(
            competition = self.competition_id,
            participants = ledger.len(),
            budget = ledger.budget(),
            "competition loaded"
        );
        Ok(ledger)
    }

    /// Ask the backend whether this judge still has to poll the competition.
    ///
    /// A competition already voted on should go straight to [`results`](Self::results).
    pub fn poll_status(&mut self) -> Result<PollStatus, TransportError> {
        let polls = self.backend.fetch_my_polls().inspect_err(|_| {
            warn!(competition = self.competition_id, "poll overview fetch failed");
        })?;
        Ok(polls.status(self.competition_id))
    }

    pub fn competition(&self) -> Option<&Competition> {
        self.competition.as_ref()
    }

    pub fn ledger(&self) -> Option<&AllocationLedger> {
        self.ledger.as_ref()
    }

    pub fn ledger_mut(&mut self) -> Option<&mut AllocationLedger> {
        self.ledger.as_mut()
    }

    /// Validate and deliver the allocation.
    ///
    /// The backend is called once; there is no retry. If validation or
    /// delivery fails the ledger is left as it was so the judge can fix it
    /// and resubmit. On success the ledger is discarded.
    pub fn submit(&mut self) -> Result<Submission, SessionError> {
        let ledger = self.ledger.as_ref().ok_or(SessionError::NotLoaded)?;
        let submission = ledger.to_submission().inspect_err(|_| {
            info!(
                competition = self.competition_id,
                remaining = ledger.remaining_points(),
                "submission rejected"
            );
        })?;

        self.backend
            .submit_polls(self.competition_id, &submission)
            .inspect_err(|_| {
                warn!(competition = self.competition_id, "submission failed, ledger kept");
            })?;

        info!(
            competition = self.competition_id,
            polls = submission.polls.len(),
            "submission delivered"
        );
        self.ledger = None;
        Ok(submission)
    }

    /// Fetch results and rank them.
    ///
    /// A malformed response yields an empty leaderboard; a failed fetch is
    /// returned as an error.
    pub fn results(&mut self) -> Result<Leaderboard, TransportError> {
        let value = self
            .backend
            .fetch_scores(self.competition_id)
            .inspect_err(|_| {
                warn!(competition = self.competition_id, "results fetch failed");
            })?;
        Ok(Leaderboard::from_value(value, self.ranking_policy.clone()))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
