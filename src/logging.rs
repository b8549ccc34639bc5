//! Feature-gated tracing macros used inside the library.
//!
//! With the `logging` feature the macros forward to `tracing`. Without it
//! they expand to nothing, so the library carries no subscriber requirement
//! and no runtime cost.
//!
//! ```rust,ignore
//! use crate::logging::{debug, warn};
//!
//! debug!(participants = count, budget, "ledger initialized");
//! warn!(index, "skipping malformed score record");
//! ```

/// Per-keystroke detail (score parsing, clamping).
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// Ledger and leaderboard construction.
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Session lifecycle: loads, submissions, result fetches.
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Degraded input and failed collaborator calls.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_info as info;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;
