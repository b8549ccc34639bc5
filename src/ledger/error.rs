//! Error types for the allocation ledger.

use thiserror::Error;

use super::types::ParticipantId;

/// Validation failures raised by the ledger.
///
/// All of them are recoverable by further edits; none touch ledger state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The budget has not been spent exactly. `remaining` is negative when
    /// the judge has over-allocated.
    #[error("Allocation incomplete: {remaining} points remaining")]
    IncompleteAllocation { remaining: i64 },

    #[error("Participant {0} is not part of this allocation")]
    UnknownParticipant(ParticipantId),

    #[error("Invalid budget: a competition must distribute at least one point")]
    InvalidBudget,
}
