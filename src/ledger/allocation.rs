//! Budget-bounded mapping from participant to allocated points.

use std::collections::BTreeMap;

use crate::logging::{debug, trace};

use super::error::LedgerError;
use super::types::{AllocationEntry, EMPTY_FEEDBACK, Participant, ParticipantId, Poll, Submission};

/// Tracks how a judge distributes a fixed point budget.
///
/// The budget is only checked when building a submission. Individual
/// edits may push the allocation over or under the budget while the judge
/// is still moving points around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationLedger {
    budget: u32,
    entries: BTreeMap<ParticipantId, AllocationEntry>,
}

impl AllocationLedger {
    /// Create an empty ledger for `budget` points.
    pub fn new(budget: u32) -> Result<Self, LedgerError> {
        if budget == 0 {
            return Err(LedgerError::InvalidBudget);
        }
        Ok(Self {
            budget,
            entries: BTreeMap::new(),
        })
    }

    /// Create a ledger with a zeroed entry for every participant except
    /// `excluded`.
    pub fn initialize(
        participants: &[Participant],
        excluded: Option<ParticipantId>,
        budget: u32,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(budget)?;
        let seeded = ledger.merge_participants(participants, excluded);
        debug!(participants = seeded, budget, "ledger initialized");
        Ok(ledger)
    }

    /// Seed entries for participants the ledger does not know yet.
    ///
    /// Existing entries keep their score and feedback, so a repeated fetch
    /// of the participant list never discards edits. Returns the number of
    /// entries added.
    pub fn merge_participants(
        &mut self,
        participants: &[Participant],
        excluded: Option<ParticipantId>,
    ) -> usize {
        let mut seeded = 0;
        for participant in participants {
            let key = participant.key();
            if Some(key) == excluded || self.entries.contains_key(&key) {
                continue;
            }
            self.entries.insert(key, AllocationEntry::default());
            seeded += 1;
        }
        if seeded > 0 {
            debug!(seeded, total = self.entries.len(), "merged participants into ledger");
        }
        seeded
    }

    /// Set the points for a participant. Negative values clamp to zero.
    ///
    /// Returns the stored value.
    pub fn set_score(&mut self, id: ParticipantId, score: i64) -> Result<u32, LedgerError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(LedgerError::UnknownParticipant(id))?;
        let clamped = clamp_score(score);
        if i64::from(clamped) != score {
            trace!(participant = %id, requested = score, stored = clamped, "score clamped");
        }
        entry.score = clamped;
        Ok(clamped)
    }

    /// Set the points for a participant from raw form input.
    ///
    /// Non-numeric input counts as zero; fractions are truncated.
    pub fn set_score_input(&mut self, id: ParticipantId, raw: &str) -> Result<u32, LedgerError> {
        self.set_score(id, parse_score_input(raw))
    }

    /// Replace the feedback text for a participant.
    pub fn set_feedback(
        &mut self,
        id: ParticipantId,
        text: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(LedgerError::UnknownParticipant(id))?;
        entry.feedback = text.into();
        Ok(())
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Replace the budget, keeping every entry. Zero is rejected and leaves
    /// the ledger unchanged.
    pub fn set_budget(&mut self, budget: u32) -> Result<(), LedgerError> {
        if budget == 0 {
            return Err(LedgerError::InvalidBudget);
        }
        if budget != self.budget {
            debug!(from = self.budget, to = budget, "ledger budget changed");
        }
        self.budget = budget;
        Ok(())
    }

    pub fn entry(&self, id: ParticipantId) -> Option<&AllocationEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Entries in ascending participant order.
    pub fn entries(&self) -> impl Iterator<Item = (ParticipantId, &AllocationEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all allocated points.
    pub fn allocated(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.score)).sum()
    }

    /// Budget minus allocated points. Negative when over-allocated.
    pub fn remaining_points(&self) -> i64 {
        let allocated = i64::try_from(self.allocated()).unwrap_or(i64::MAX);
        i64::from(self.budget).saturating_sub(allocated)
    }

    /// Whether the budget is spent exactly.
    pub fn can_submit(&self) -> bool {
        self.remaining_points() == 0
    }

    /// Build the submission payload.
    ///
    /// Fails unless the budget is spent exactly. Empty feedback is sent as
    /// the [`EMPTY_FEEDBACK`] sentinel.
    pub fn to_submission(&self) -> Result<Submission, LedgerError> {
        let remaining = self.remaining_points();
        if remaining != 0 {
            return Err(LedgerError::IncompleteAllocation { remaining });
        }

        let polls = self
            .entries
            .iter()
            .map(|(id, entry)| Poll {
                participant_id: *id,
                score: entry.score,
                feedback: if entry.feedback.is_empty() {
                    EMPTY_FEEDBACK.to_string()
                } else {
                    entry.feedback.clone()
                },
            })
            .collect();

        Ok(Submission { polls })
    }
}

fn clamp_score(score: i64) -> u32 {
    u32::try_from(score.max(0)).unwrap_or(u32::MAX)
}

/// Interpret raw form input as a score.
///
/// Integers parse directly, finite decimals truncate toward zero, and
/// anything else (empty, text, NaN, infinities) yields zero.
pub fn parse_score_input(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}
