//! Result ranker: turns aggregated score records into a leaderboard.
//!
//! Every function here is pure and total. Malformed collaborator responses
//! degrade to an empty leaderboard instead of an error.

mod leaderboard;
mod record;
mod tier;

pub use leaderboard::{
    Leaderboard, LeaderboardReport, LeaderboardRow, NO_FEEDBACK, RankingPolicy, ScoreCell,
    column_maxima, display_feedback, feedback_for, is_column_best, rank,
};
pub use record::{ScoreRecord, parse_records, parse_records_json};
pub use tier::{PodiumTier, Tier, TierThresholds, classify};
