//! Tests for the edit session lifecycle.

use sequin_core::{BlockType, OutputEdit};
use sequin_validate::{EditSession, EditState};
use std::collections::BTreeMap;

#[test]
fn test_session_starts_viewing() {
    let session = EditSession::new(BlockType::Standard);
    assert_eq!(session.state(), EditState::Viewing);
    assert!(session.draft().is_none());
}

#[test]
fn test_update_ignored_while_viewing() {
    let mut session = EditSession::new(BlockType::Standard);
    assert!(!session.update(OutputEdit::Content("Text.".into())));
    assert!(session.draft().is_none());
}

#[test]
fn test_submit_without_draft_rejected() {
    let mut session = EditSession::new(BlockType::Standard);
    let err = session.submit().unwrap_err();
    assert_eq!(err.error_count, 0);
    assert_eq!(session.state(), EditState::Viewing);
}

#[test]
fn test_errors_keep_session_editing() {
    let mut session = EditSession::new(BlockType::Standard);
    session.begin(OutputEdit::Content(String::new()));
    assert_eq!(session.state(), EditState::Editing);

    let err = session.submit().unwrap_err();
    assert_eq!(err.error_count, 1);
    assert_eq!(session.state(), EditState::EditingWithErrors);
    assert!(!session.last_validation().unwrap().is_valid());
}

#[test]
fn test_fixed_draft_saves() {
    let mut session = EditSession::new(BlockType::Standard);
    session.begin(OutputEdit::Content(String::new()));
    let _ = session.submit();

    assert!(session.update(OutputEdit::Content("Fixed answer.".into())));
    let saved = session.submit().unwrap().clone();
    assert_eq!(saved, OutputEdit::Content("Fixed answer.".into()));
    assert_eq!(session.state(), EditState::Saved);

    assert_eq!(session.finish(), Some(saved));
    assert_eq!(session.state(), EditState::Viewing);
    assert!(session.draft().is_none());
}

#[test]
fn test_warnings_do_not_block_save() {
    let mut session = EditSession::new(BlockType::Discretization);
    let fields = BTreeMap::from([("c1".to_string(), "a widget".to_string())]);
    session.begin(OutputEdit::NamedOutputs(fields));

    assert!(session.submit().is_ok());
    assert_eq!(session.state(), EditState::Saved);
    assert_eq!(session.last_validation().unwrap().warnings.len(), 1);
}

#[test]
fn test_cancel_discards_draft() {
    let mut session = EditSession::new(BlockType::Standard);
    session.begin(OutputEdit::Content("Draft.".into()));
    session.cancel();
    assert_eq!(session.state(), EditState::Viewing);
    assert!(session.draft().is_none());
    assert!(session.finish().is_none());
}
