//! Property-based tests for budget conservation and ranking order.

mod common;

use common::{participants, record};
use pollscore::prelude::*;
use proptest::prelude::*;

fn id_set() -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::btree_set(1u64..500, 0..12).prop_map(|s| s.into_iter().collect())
}

fn score_records() -> impl Strategy<Value = Vec<ScoreRecord>> {
    proptest::collection::vec(
        (
            0i32..20,
            proptest::collection::vec(proptest::option::of(0i32..100), 0..5),
        ),
        0..10,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (total, scores))| {
                record(
                    &format!("p{i}"),
                    f64::from(total),
                    &scores.into_iter().map(|s| s.map(f64::from)).collect::<Vec<_>>(),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn remaining_equals_budget_after_initialize(ids in id_set(), budget in 1u32..100_000) {
        let ledger = AllocationLedger::initialize(&participants(&ids), None, budget).unwrap();
        prop_assert_eq!(ledger.remaining_points(), i64::from(budget));
        prop_assert_eq!(ledger.len(), ids.len());
    }

    #[test]
    fn remaining_tracks_every_edit(
        ids in id_set(),
        budget in 1u32..5_000,
        edits in proptest::collection::vec((0usize..12, -500i64..3_000), 0..40),
    ) {
        let mut ledger = AllocationLedger::initialize(&participants(&ids), None, budget).unwrap();
        for (slot, score) in edits {
            let Some(id) = ids.get(slot) else { continue };
            ledger.set_score(ParticipantId(*id), score).unwrap();

            let sum: i64 = ledger.entries().map(|(_, e)| i64::from(e.score)).sum();
            prop_assert_eq!(ledger.remaining_points(), i64::from(budget) - sum);
        }
    }

    #[test]
    fn submission_succeeds_iff_budget_spent(
        ids in id_set(),
        budget in 1u32..2_000,
        scores in proptest::collection::vec(0i64..1_000, 12),
    ) {
        let mut ledger = AllocationLedger::initialize(&participants(&ids), None, budget).unwrap();
        for (id, score) in ids.iter().zip(&scores) {
            ledger.set_score(ParticipantId(*id), *score).unwrap();
        }

        match ledger.to_submission() {
            Ok(submission) => {
                prop_assert_eq!(ledger.remaining_points(), 0);
                prop_assert_eq!(submission.total(), u64::from(budget));
            }
            Err(LedgerError::IncompleteAllocation { remaining }) => {
                prop_assert_ne!(remaining, 0);
                prop_assert_eq!(remaining, ledger.remaining_points());
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn merge_never_changes_existing_entries(
        ids in id_set(),
        extra in id_set(),
        score in 0i64..1_000,
    ) {
        let mut ledger = AllocationLedger::initialize(&participants(&ids), None, 1000).unwrap();
        for id in &ids {
            ledger.set_score(ParticipantId(*id), score).unwrap();
            ledger.set_feedback(ParticipantId(*id), format!("note {id}")).unwrap();
        }
        let before = ledger.clone();

        let mut all = ids.clone();
        all.extend(extra.iter().copied());
        ledger.merge_participants(&participants(&all), None);

        for (id, entry) in before.entries() {
            prop_assert_eq!(ledger.entry(id), Some(entry));
        }
    }

    #[test]
    fn rank_is_idempotent(records in score_records()) {
        let once = rank(&records);
        prop_assert_eq!(rank(&once), once);
    }

    #[test]
    fn rank_is_sorted_and_stable(records in score_records()) {
        let ranked = rank(&records);
        prop_assert_eq!(ranked.len(), records.len());
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.total_score >= b.total_score);
            if a.total_score == b.total_score {
                let pos = |r: &ScoreRecord| records.iter().position(|x| x.username == r.username);
                prop_assert!(pos(a) < pos(b));
            }
        }
    }

    #[test]
    fn column_best_matches_maxima(records in score_records()) {
        let maxima = column_maxima(&records);
        let longest = records.iter().map(|r| r.scores.len()).max().unwrap_or(0);
        prop_assert_eq!(maxima.len(), longest);

        for (column, max) in maxima.iter().enumerate() {
            let defined: Vec<f64> = records.iter().filter_map(|r| r.score(column)).collect();
            if defined.is_empty() {
                prop_assert_eq!(*max, 0.0);
            }
            for r in &records {
                if let Some(score) = r.score(column) {
                    prop_assert!(score <= *max);
                }
                prop_assert_eq!(
                    is_column_best(r, column, &maxima),
                    r.score(column) == Some(*max)
                );
            }
        }
    }
}
