//! Integration tests for playing custom scripts.

mod common;

use lovenote_content::Script;
use lovenote_player::error::AppError;
use lovenote_player::state;

const CUSTOM_SCRIPT: &str = r#"
title: "Short note"
decline_feedback: "Are you sure?"
pages:
  - number: 1
    heading: "Hello"
  - number: 2
    heading: "Open me"
    actions:
      open_envelope: "Tear it open"
  - number: 3
    heading: "Three"
  - number: 4
    heading: "Four"
  - number: 5
    heading: "Five"
  - number: 6
    heading: "Six"
  - number: 7
    heading: "Seven"
  - number: 8
    heading: "The end"
"#;

#[test]
fn test_custom_script_labels_and_fallbacks() {
    let mut session =
        common::build_test_session_with_script(Script::from_yaml(CUSTOM_SCRIPT).unwrap());

    let views = common::play(
        &mut session,
        &[
            "advance",
            "open-envelope",
            "advance",
            "advance",
            "decline-doodle",
        ],
    );

    assert_eq!(views[0]["heading"], "Hello");
    assert_eq!(views[0]["actions"][0]["label"], "advance");
    assert_eq!(views[1]["actions"][0]["label"], "Tear it open");
    assert_eq!(views[5]["page"], 4);
    assert_eq!(views[5]["feedback"], "Are you sure?");
}

#[test]
fn test_load_script_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "lovenote-script-{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, CUSTOM_SCRIPT).unwrap();

    let script = state::load_script(path.to_str()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(script.title(), "Short note");
}

#[test]
fn test_load_script_rejects_invalid_file() {
    let path = std::env::temp_dir().join(format!(
        "lovenote-invalid-{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, "title: t\ndecline_feedback: f\npages: []\n").unwrap();

    let result = state::load_script(path.to_str());
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(AppError::Content(_))));
}
