//! Point-budget polls for competitions.
//!
//! A judge distributes a fixed budget of points across the participants of
//! a competition; the backend aggregates every judge's polls; the results
//! are ranked into a leaderboard.
//!
//! # Quick Start
//!
//! ```ignore
//! use pollscore::prelude::*;
//!
//! let competition = Competition::from_json(body)?;
//! let judge = JudgeContext::new(42);
//! let mut ledger = AllocationLedger::initialize(
//!     &competition.participants,
//!     judge.excluded(&LedgerPolicy::default()),
//!     competition.budget(DEFAULT_BUDGET),
//! )?;
//!
//! ledger.set_score(ParticipantId(7), 600)?;
//! ledger.set_score(ParticipantId(8), 400)?;
//! let submission = ledger.to_submission()?;
//!
//! let board = Leaderboard::from_json(results_body, RankingPolicy::default());
//! for row in board.rows() {
//!     println!("{} {} {}", row.position, row.username, row.total_score);
//! }
//! ```
//!
//! # Modules
//!
//! - [`ledger`] - Allocation ledger and the competition/submission shapes
//! - [`ranker`] - Leaderboard ranking, column maxima, tiers and podium
//! - [`session`] - Judge session over a pluggable [`session::Backend`]
//! - [`config`] - TOML configuration (requires `config` feature)
//!
//! # Feature Flags
//!
//! - `config` - TOML configuration loading (enabled by default)
//! - `logging` - Library-level tracing (consumers provide their own subscriber)
//! - `cli` - The `pollscore` command-line binary
//! - `full` - Enable all features

#[macro_use]
pub(crate) mod logging;

#[cfg(feature = "config")]
pub mod config;
mod error;
pub mod ledger;
pub mod prelude;
pub mod ranker;
pub mod session;
#[cfg(feature = "cli")]
pub mod subscriber;

pub use error::{Error, Result};

pub use ledger::{
    AllocationEntry, AllocationLedger, Competition, CompetitionSummary, DEFAULT_BUDGET,
    EMPTY_FEEDBACK, JudgeContext, LedgerError, LedgerPolicy, MyPolls, Participant, ParticipantId,
    Poll, PollStatus, Submission,
};
pub use ranker::{
    Leaderboard, LeaderboardRow, NO_FEEDBACK, PodiumTier, RankingPolicy, ScoreRecord, Tier,
    TierThresholds,
};
pub use session::{Backend, PollSession, SessionError, TransportError};

#[cfg(feature = "config")]
pub use config::{Config, ConfigError};
