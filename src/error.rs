//! Unified error type for the pollscore library.
//!
//! [`Error`] wraps the module-specific errors so application code can use a
//! single error type end to end.
//!
//! # Example
//!
//! ```ignore
//! use pollscore::{AllocationLedger, Result};
//!
//! fn finalize(ledger: &AllocationLedger) -> Result<String> {
//!     let submission = ledger.to_submission()?;
//!     Ok(serde_json::to_string(&submission)?)
//! }
//! ```

use thiserror::Error;

#[cfg(feature = "config")]
use crate::config::ConfigError;
use crate::ledger::LedgerError;
use crate::session::{SessionError, TransportError};

#[derive(Error, Debug)]
pub enum Error {
    /// The allocation failed validation; fix the ledger and try again.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A collaborator call failed; state is untouched.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The session has no competition loaded yet.
    #[error("Competition has not been loaded")]
    NotLoaded,

    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Validation(e) => Self::Ledger(e),
            SessionError::Transport(e) => Self::Transport(e),
            SessionError::NotLoaded => Self::NotLoaded,
        }
    }
}

impl Error {
    /// Returns `true` if the allocation was rejected by validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Ledger(_))
    }

    /// Returns `true` if a collaborator call failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Remaining points when the allocation was incomplete.
    pub fn remaining_points(&self) -> Option<i64> {
        match self {
            Self::Ledger(LedgerError::IncompleteAllocation { remaining }) => Some(*remaining),
            _ => None,
        }
    }
}
