//! Allocation ledger: how a judge spends a fixed point budget.
//!
//! A ledger is seeded from a competition's participant list, edited one
//! participant at a time, and turned into a [`Submission`] once the budget
//! is spent exactly.

mod allocation;
mod error;
mod types;

pub use allocation::{AllocationLedger, parse_score_input};
pub use error::LedgerError;
pub use types::{
    AllocationEntry, Competition, CompetitionSummary, DEFAULT_BUDGET, EMPTY_FEEDBACK,
    JudgeContext, LedgerPolicy, MyPolls, Participant, ParticipantId, Poll, PollStatus, Submission,
};
