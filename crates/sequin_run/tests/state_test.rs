//! Tests for run state reconciliation and optimistic edits.

use chrono::Utc;
use sequin_core::{BlockResponse, BlockRun, InputOverrides, NO_OUTPUT, RunStatus, SequenceRunResult};
use sequin_run::{OptimisticEdit, RunState};

fn persisted_run(id: i64, text: Option<&str>) -> SequenceRunResult {
    let mut run = SequenceRunResult::new(id, RunStatus::Completed);
    run.block_runs.push(BlockRun {
        id: Some(500),
        block_id: 42,
        llm_output_text: text.map(str::to_string),
        completed_at: Some(Utc::now()),
        ..Default::default()
    });
    run
}

fn live_response(text: &str) -> BlockResponse {
    BlockResponse::live(&BlockRun {
        block_id: 42,
        llm_output_text: Some(text.to_string()),
        ..Default::default()
    })
}

#[test]
fn test_live_takes_precedence_over_persisted() {
    let mut state = RunState::new();
    state.replace_persisted(persisted_run(7, Some("persisted")));
    state.record_live(42, live_response("live"));

    let effective = state.effective_response(42).unwrap();
    assert!(effective.is_live);
    assert_eq!(effective.content.as_deref(), Some("live"));
    assert_eq!(effective.run_id, Some(7));
}

#[test]
fn test_full_run_supersedes_live() {
    let mut state = RunState::new();
    state.record_live(42, live_response("live"));
    state.commit_full_run(persisted_run(8, Some("fresh")));

    assert_eq!(state.live_count(), 0);
    let effective = state.effective_response(42).unwrap();
    assert!(!effective.is_live);
    assert_eq!(effective.content.as_deref(), Some("fresh"));
    assert_eq!(effective.block_run_id, Some(500));
}

#[test]
fn test_live_without_persisted_has_no_run_id() {
    let mut state = RunState::new();
    state.record_live(42, live_response("live"));
    let effective = state.effective_response(42).unwrap();
    assert_eq!(effective.run_id, None);
}

#[test]
fn test_missing_content_renders_sentinel() {
    let mut state = RunState::new();
    state.replace_persisted(persisted_run(7, None));
    let effective = state.effective_response(42).unwrap();
    assert_eq!(effective.content.as_deref(), Some(NO_OUTPUT));
}

#[test]
fn test_unknown_block_has_no_response() {
    let mut state = RunState::new();
    assert!(state.effective_response(42).is_none());
    state.replace_persisted(persisted_run(7, Some("x")));
    assert!(state.effective_response(99).is_none());
}

#[test]
fn test_replace_persisted_keeps_live() {
    let mut state = RunState::new();
    state.record_live(42, live_response("live"));
    state.replace_persisted(persisted_run(9, Some("rerun")));
    assert!(state.effective_response(42).unwrap().is_live);

    state.clear_live_for(&[42]);
    assert!(!state.effective_response(42).unwrap().is_live);
}

#[test]
fn test_optimistic_edit_rollback_restores_prior_values() {
    let mut overrides = InputOverrides::new();
    overrides.set("c1", "before");

    let edit = OptimisticEdit::apply(
        &mut overrides,
        vec![
            ("c1".to_string(), "after".to_string()),
            ("c2".to_string(), "new".to_string()),
        ],
    );
    assert_eq!(overrides.get("c1"), Some("after"));
    assert_eq!(overrides.get("c2"), Some("new"));
    assert_eq!(edit.names().collect::<Vec<_>>(), vec!["c1", "c2"]);

    edit.rollback(&mut overrides);
    assert_eq!(overrides.get("c1"), Some("before"));
    assert_eq!(overrides.get("c2"), None);
}

#[test]
fn test_optimistic_edit_confirm_keeps_values() {
    let mut overrides = InputOverrides::new();
    let edit = OptimisticEdit::apply(&mut overrides, vec![("a".to_string(), "x".to_string())]);
    edit.confirm();
    assert_eq!(overrides.get("a"), Some("x"));
}

#[test]
fn test_result_from_superseded_generation_is_dropped() {
    let mut state = RunState::new();
    let started = state.generation();

    state.commit_full_run(persisted_run(8, Some("fresh")));
    assert_ne!(state.generation(), started);

    assert!(!state.record_live_if_current(started, 42, live_response("stale")));
    assert_eq!(state.live_count(), 0);
    assert!(!state.effective_response(42).unwrap().is_live);

    let current = state.generation();
    assert!(state.record_live_if_current(current, 42, live_response("fresh live")));
    assert!(state.effective_response(42).unwrap().is_live);
}

#[test]
fn test_clearing_live_advances_generation() {
    let mut state = RunState::new();
    let started = state.generation();
    state.clear_live();
    assert!(!state.record_live_if_current(started, 42, live_response("stale")));

    let started = state.generation();
    state.replace_persisted(persisted_run(9, Some("rerun")));
    state.clear_live_for(&[42]);
    assert_eq!(state.generation(), started);
}

#[test]
fn test_rerun_commit_clears_stale_blocks_and_advances_generation() {
    let mut state = RunState::new();
    state.commit_full_run(persisted_run(8, Some("first")));
    state.record_live(42, live_response("live 42"));
    state.record_live(7, live_response("live 7"));
    let started = state.generation();

    state.commit_rerun(persisted_run(9, Some("rerun")), &[42]);
    assert_ne!(state.generation(), started);
    assert_eq!(state.run_id(), Some(9));
    assert_eq!(state.live_count(), 1);
    assert!(!state.effective_response(42).unwrap().is_live);

    assert!(!state.record_live_if_current(started, 42, live_response("stale")));
    assert!(!state.effective_response(42).unwrap().is_live);
}
