//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use pollscore::prelude::*;
//!
//! let mut ledger = AllocationLedger::initialize(&participants, None, DEFAULT_BUDGET)?;
//! ledger.set_score(ParticipantId(1), DEFAULT_BUDGET.into())?;
//! let submission = ledger.to_submission()?;
//! ```

pub use crate::error::{Error, Result};

pub use crate::ledger::{
    AllocationEntry, AllocationLedger, Competition, CompetitionSummary, DEFAULT_BUDGET,
    EMPTY_FEEDBACK, JudgeContext, LedgerError, LedgerPolicy, MyPolls, Participant, ParticipantId,
    Poll, PollStatus, Submission,
};

pub use crate::ranker::{
    Leaderboard, LeaderboardRow, PodiumTier, RankingPolicy, ScoreCell, ScoreRecord, Tier,
    TierThresholds, classify, column_maxima, feedback_for, is_column_best, rank,
};

pub use crate::session::{Backend, PollSession, SessionError, TransportError};

#[cfg(feature = "config")]
pub use crate::config::{Config, ConfigError};
