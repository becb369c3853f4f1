//! Swap session lifecycle: phase transitions, cancellation rules, and the
//! re-quote-on-confirm guarantee.

mod common;

use common::{pools, registry, PEZ, WHEZ};
use pezdex_swap::{
    EngineConfig, FailureReason, SessionError, SessionPhase, SwapEngine, SwapInput, SwapSession,
};
use pezdex_types::{PoolSet, PoolSnapshot};

fn engine() -> SwapEngine {
    SwapEngine::new(registry(), EngineConfig::default()).unwrap()
}

fn hez_to_pez(amount: &str) -> SwapInput {
    SwapInput {
        from_symbol: "HEZ".into(),
        to_symbol: "PEZ".into(),
        amount_in: amount.into(),
    }
}

#[test]
fn happy_path_reaches_settled() {
    let engine = engine();
    let pools = pools();
    let mut session = SwapSession::new();
    assert_eq!(session.phase(), SessionPhase::Idle);

    let quote = session
        .update_input(&engine, &pools, hez_to_pez("1.5"))
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::Quoting);
    assert_eq!(quote.amount_in, 1_500_000_000_000);
    assert!(quote.amount_out > 0);

    session.begin_review().unwrap();
    assert_eq!(session.phase(), SessionPhase::Confirming);

    let plan = session.confirm(&engine, &pools).unwrap();
    assert_eq!(session.phase(), SessionPhase::Submitting);
    assert_eq!(plan.steps.len(), 2);

    session.record_settled().unwrap();
    assert_eq!(session.phase(), SessionPhase::Settled);

    // Terminal phases need an explicit reset before a new trade.
    session.reset().unwrap();
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.quote().is_none());
}

#[test]
fn input_changes_supersede_the_previous_quote() {
    let engine = engine();
    let pools = pools();
    let mut session = SwapSession::new();

    let first = session
        .update_input(&engine, &pools, hez_to_pez("1"))
        .unwrap();
    let second = session
        .update_input(&engine, &pools, hez_to_pez("2"))
        .unwrap();

    assert!(second.amount_in > first.amount_in);
    assert_eq!(session.quote().unwrap(), &second);
    assert_eq!(session.input().unwrap().amount_in, "2");
}

#[test]
fn failed_quote_stays_in_quoting_with_the_error_recorded() {
    let engine = engine();
    let pools = pools();
    let mut session = SwapSession::new();

    let err = session
        .update_input(&engine, &pools, hez_to_pez("not-a-number"))
        .unwrap_err();
    assert!(matches!(err, SessionError::Engine(_)));
    assert_eq!(session.phase(), SessionPhase::Quoting);
    assert!(session.quote().is_none());
    assert!(session.last_error().is_some());

    // Review is not reachable without a successful quote.
    assert!(matches!(
        session.begin_review(),
        Err(SessionError::InvalidTransition { .. })
    ));

    // A corrected input recovers in place.
    session.update_input(&engine, &pools, hez_to_pez("1")).unwrap();
    assert!(session.last_error().is_none());
    session.begin_review().unwrap();
}

#[test]
fn confirm_requotes_against_fresh_reserves() {
    let engine = engine();
    let pools = pools();
    let mut session = SwapSession::new();

    session
        .update_input(&engine, &pools, hez_to_pez("1"))
        .unwrap();
    let reviewed_min = session.quote().unwrap().min_amount_out;
    session.begin_review().unwrap();

    // Reserves move between review and confirmation; the submitted bound
    // must come from the fresh snapshot, not the reviewed one.
    let mut moved = PoolSet::new();
    moved.insert(PoolSnapshot::new(
        WHEZ,
        PEZ,
        1_000_000_000_000_000,
        1_500_000_000_000_000,
        30,
    ));

    let plan = session.confirm(&engine, &moved).unwrap();
    let submitted_min = session.quote().unwrap().min_amount_out;
    assert!(submitted_min < reviewed_min);
    match &plan.steps[1] {
        pezdex_swap::RouteStep::Swap { min_amount_out, .. } => {
            assert_eq!(*min_amount_out, submitted_min);
        }
        other => panic!("expected swap step, got {other:?}"),
    }
}

#[test]
fn confirm_failure_keeps_the_session_confirming() {
    let engine = engine();
    let pools = pools();
    let mut session = SwapSession::new();

    session
        .update_input(&engine, &pools, hez_to_pez("1"))
        .unwrap();
    session.begin_review().unwrap();

    // The pool vanishes before confirmation.
    let empty = PoolSet::new();
    let err = session.confirm(&engine, &empty).unwrap_err();
    assert!(matches!(err, SessionError::Engine(_)));
    assert_eq!(session.phase(), SessionPhase::Confirming);

    // The user can still walk away.
    session.cancel().unwrap();
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[test]
fn submitting_is_the_point_of_no_return() {
    let engine = engine();
    let pools = pools();
    let mut session = SwapSession::new();

    session
        .update_input(&engine, &pools, hez_to_pez("1"))
        .unwrap();
    session.begin_review().unwrap();
    session.confirm(&engine, &pools).unwrap();
    assert_eq!(session.phase(), SessionPhase::Submitting);

    assert!(matches!(
        session.cancel(),
        Err(SessionError::InvalidTransition {
            from: SessionPhase::Submitting,
            ..
        })
    ));
    assert!(matches!(
        session.update_input(&engine, &pools, hez_to_pez("9")),
        Err(SessionError::InvalidTransition { .. })
    ));

    session
        .record_failure(FailureReason::SigningRejected)
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::Failed);
    assert_eq!(session.failure(), Some(&FailureReason::SigningRejected));

    session.reset().unwrap();
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.failure().is_none());
}

#[test]
fn cancel_is_allowed_from_every_phase_except_submitting() {
    let engine = engine();
    let pools = pools();

    // Idle.
    let mut session = SwapSession::new();
    session.cancel().unwrap();

    // Quoting.
    session
        .update_input(&engine, &pools, hez_to_pez("1"))
        .unwrap();
    session.cancel().unwrap();
    assert_eq!(session.phase(), SessionPhase::Idle);

    // Confirming.
    session
        .update_input(&engine, &pools, hez_to_pez("1"))
        .unwrap();
    session.begin_review().unwrap();
    session.cancel().unwrap();
    assert_eq!(session.phase(), SessionPhase::Idle);

    // Settled.
    session
        .update_input(&engine, &pools, hez_to_pez("1"))
        .unwrap();
    session.begin_review().unwrap();
    session.confirm(&engine, &pools).unwrap();
    session.record_settled().unwrap();
    session.cancel().unwrap();
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[test]
fn collaborator_outcomes_only_apply_while_submitting() {
    let mut session = SwapSession::new();
    assert!(matches!(
        session.record_settled(),
        Err(SessionError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.record_failure(FailureReason::Timeout),
        Err(SessionError::InvalidTransition { .. })
    ));
}
