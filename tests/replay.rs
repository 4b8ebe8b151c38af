use deck_wizard::script::{self, ScriptError};
use deck_wizard::{WizardConfig, WizardError};
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn load_balancer_demo_replays_to_completion() {
    let config = WizardConfig::load_from(demo("load-balancer.toml")).unwrap();
    let source = std::fs::read_to_string(demo("load-balancer.wizard")).unwrap();
    let mut tracker = config.build_tracker();
    let mut out = Vec::new();

    let report = script::replay(&mut tracker, &source, &mut out).unwrap();

    assert_eq!(report.commands, 20);
    assert!(tracker.is_complete());
    assert!(tracker.all_pages_visited());
    assert!(!tracker.get_page("advanced").unwrap().visited);

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "4/4 done (4 required), 4/4 visited, ready to submit");
}

#[test]
fn replay_reports_failing_line() {
    let config = WizardConfig::load_from(demo("load-balancer.toml")).unwrap();
    let mut tracker = config.build_tracker();
    let source = "show location\ncomplete location\n\nexpect complete\n";

    match script::replay(&mut tracker, source, &mut Vec::new()) {
        Err(WizardError::Script(ScriptError::AtLine { line, .. })) => assert_eq!(line, 4),
        other => panic!("expected a line-tagged script error, got {other:?}"),
    }
}

#[test]
fn replay_rejects_unknown_commands() {
    let mut tracker = WizardConfig::default().build_tracker();
    let err = script::replay(&mut tracker, "launch rockets", &mut Vec::new()).unwrap_err();

    assert_eq!(err.to_string(), "Script error: line 1: Unknown command: launch");
}
