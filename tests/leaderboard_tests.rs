//! Leaderboard and allocation scenarios taken end to end from JSON documents.

mod common;

use common::{COMPETITION_JSON, SCORES_JSON, participants, record};
use pollscore::prelude::*;
use serde_json::json;

// =============================================================================
// Allocation
// =============================================================================

#[test]
fn test_exact_budget_submits() -> anyhow::Result<()> {
    let mut ledger = AllocationLedger::initialize(&participants(&[1, 2, 3]), None, 1000)?;
    ledger.set_score(ParticipantId(1), 400)?;
    ledger.set_score(ParticipantId(2), 600)?;
    ledger.set_score(ParticipantId(3), 0)?;

    let submission = ledger.to_submission()?;
    assert_eq!(submission.polls.len(), 3);
    assert_eq!(submission.total(), 1000);
    Ok(())
}

#[test]
fn test_short_budget_is_rejected() -> anyhow::Result<()> {
    let mut ledger = AllocationLedger::initialize(&participants(&[1, 2, 3]), None, 1000)?;
    ledger.set_score(ParticipantId(1), 400)?;
    ledger.set_score(ParticipantId(2), 500)?;
    ledger.set_score(ParticipantId(3), 0)?;

    assert_eq!(ledger.remaining_points(), 100);
    assert_eq!(
        ledger.to_submission(),
        Err(LedgerError::IncompleteAllocation { remaining: 100 })
    );
    Ok(())
}

#[test]
fn test_competition_document_to_payload() -> anyhow::Result<()> {
    let competition = Competition::from_json(COMPETITION_JSON)?;
    let judge = JudgeContext::new(104);
    let mut ledger = AllocationLedger::initialize(
        &competition.participants,
        judge.excluded(&LedgerPolicy::default()),
        competition.budget(DEFAULT_BUDGET),
    )?;
    assert_eq!(ledger.len(), 3);

    ledger.set_score_input(ParticipantId(101), "500")?;
    ledger.set_score_input(ParticipantId(102), "300.7")?;
    ledger.set_score_input(ParticipantId(103), "200")?;
    ledger.set_feedback(ParticipantId(101), "strong finish")?;
    assert_eq!(
        ledger.set_score(ParticipantId(104), 10),
        Err(LedgerError::UnknownParticipant(ParticipantId(104)))
    );

    let payload = serde_json::to_value(ledger.to_submission()?)?;
    assert_eq!(
        payload,
        json!({
            "polls": [
                {"participant_id": 101, "score": 500, "feedback": "strong finish"},
                {"participant_id": 102, "score": 300, "feedback": "empty"},
                {"participant_id": 103, "score": 200, "feedback": "empty"}
            ]
        })
    );
    Ok(())
}

// =============================================================================
// Ranking
// =============================================================================

#[test]
fn test_ties_keep_arrival_order() {
    let ranked = rank(&[record("A", 50.0, &[]), record("B", 50.0, &[])]);
    let names: Vec<&str> = ranked.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_column_maxima_and_best_flags() {
    let first = record("first", 30.0, &[Some(10.0), Some(20.0)]);
    let second = record("second", 30.0, &[Some(30.0)]);
    let board = Leaderboard::new(&[first.clone(), second.clone()]);

    assert_eq!(board.column_maxima(), &[30.0, 20.0]);
    assert!(board.is_column_best(&second, 0));
    assert!(board.is_column_best(&first, 1));
    assert!(!board.is_column_best(&first, 0));
}

#[test]
fn test_scores_document_rows() {
    let board = Leaderboard::from_json(SCORES_JSON, RankingPolicy::default());
    let rows = board.rows();

    let names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["finuaz", "pojan", "olenter", "bintang"]);
    assert_eq!(board.winner().map(|r| r.username.as_str()), Some("finuaz"));

    let podium: Vec<PodiumTier> = rows.iter().map(|r| r.podium).collect();
    assert_eq!(
        podium,
        vec![
            PodiumTier::Gold,
            PodiumTier::Silver,
            PodiumTier::Bronze,
            PodiumTier::None
        ]
    );

    assert_eq!(board.column_maxima(), &[500.0, 400.0]);
    assert!(rows[0].cells.iter().all(|c| c.best));
    assert!(!rows[2].cells[1].best);
    assert_eq!(rows[3].cells[0].tier, Tier::Unknown);
    assert_eq!(rows[3].cells[1].score, None);

    assert_eq!(rows[1].feedback, vec!["clear", "No feedback"]);
    assert_eq!(rows[2].feedback, vec!["No feedback", "ok"]);
}

#[test]
fn test_tied_column_max_marks_every_holder() {
    let board = Leaderboard::new(&[
        record("a", 90.0, &[Some(90.0)]),
        record("b", 90.0, &[Some(90.0)]),
    ]);
    assert!(board.rows().iter().all(|row| row.cells[0].best));
}

#[test]
fn test_malformed_responses_degrade() {
    for value in [
        json!({"detail": "Not authenticated"}),
        json!(null),
        json!(42),
        json!("[]"),
    ] {
        let board = Leaderboard::from_value(value, RankingPolicy::default());
        assert!(board.is_empty());
        assert!(board.column_maxima().is_empty());
        assert_eq!(board.report().columns, 0);
    }
    assert!(Leaderboard::from_json("<html>502</html>", RankingPolicy::default()).is_empty());
}

#[test]
fn test_feedback_sentinel_round_trip() -> anyhow::Result<()> {
    let mut ledger = AllocationLedger::initialize(&participants(&[7]), None, 10)?;
    ledger.set_score(ParticipantId(7), 10)?;
    let submission = ledger.to_submission()?;
    let sent = &submission.polls[0].feedback;
    assert_eq!(sent, EMPTY_FEEDBACK);

    let received = ScoreRecord::new("user-7", 10.0).with_feedbacks([sent.as_str(), ""]);
    assert_eq!(feedback_for(&received), vec!["No feedback", "No feedback"]);
    Ok(())
}

#[test]
fn test_report_serializes_tiers() -> anyhow::Result<()> {
    let board = Leaderboard::new(&[record("solo", 85.0, &[Some(85.0), None])]);
    let report = serde_json::to_value(board.report())?;
    assert_eq!(report["columns"], json!(2));
    assert_eq!(report["rows"][0]["podium"], json!("gold"));
    assert_eq!(report["rows"][0]["cells"][0]["tier"], json!("high"));
    assert_eq!(report["rows"][0]["cells"][1]["tier"], json!("unknown"));
    assert_eq!(report["rows"][0]["cells"][1]["score"], json!(null));
    Ok(())
}
