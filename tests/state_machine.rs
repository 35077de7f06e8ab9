mod common;

use common::snapshot;
use scrape_console::client::{Command, ExportKind};
use scrape_console::machine::{MachineEvent, ProcessPhase, ProcessStateMachine};

#[test]
fn console_starts_idle() {
    let machine = ProcessStateMachine::new();
    let view = machine.view();
    assert_eq!(machine.state().phase, ProcessPhase::Idle);
    assert_eq!(view.status_label, "Idle");
    assert!(view.controls.start);
    assert!(!view.controls.stop);
    assert!(!view.scroll_status_visible);
}

#[test]
fn running_snapshot_enables_process_controls() {
    let mut machine = ProcessStateMachine::new();
    let events = machine.apply_snapshot(snapshot(true, Some("crawling page 3"), &["a", "b"], false));

    assert_eq!(events, vec![MachineEvent::Started]);
    let view = machine.view();
    assert_eq!(machine.state().phase, ProcessPhase::Running);
    assert_eq!(view.task_label, "crawling page 3");
    assert!(view.controls.stop);
    assert!(view.controls.send_enter);
    assert!(view.controls.toggle_scroll);
    assert!(!view.controls.start);
    assert!(!view.scroll_status_visible);
    assert_eq!(view.log, ["a".to_string(), "b".to_string()]);
}

#[test]
fn idle_snapshot_after_running_hides_stale_scroll() {
    let mut machine = ProcessStateMachine::new();
    machine.apply_snapshot(snapshot(true, Some("crawling page 3"), &["a", "b"], false));
    let events = machine.apply_snapshot(snapshot(false, None, &["a", "b", "c"], true));

    // The stale auto-scroll flag raises no event while idle.
    assert_eq!(events, vec![MachineEvent::Stopped]);
    let view = machine.view();
    assert_eq!(machine.state().phase, ProcessPhase::Idle);
    assert!(view.controls.start);
    assert!(!view.controls.stop);
    assert!(!view.controls.toggle_scroll);
    assert!(!view.controls.send_enter);
    assert!(!view.scroll_status_visible);
    assert_eq!(view.log.len(), 3);
}

#[test]
fn stale_scroll_flag_does_not_fire_on_next_run() {
    let mut machine = ProcessStateMachine::new();
    machine.apply_snapshot(snapshot(false, None, &[], true));
    let events = machine.apply_snapshot(snapshot(true, None, &[], true));
    assert_eq!(events, vec![MachineEvent::Started]);
    assert!(machine.view().scroll_status_visible);
}

#[test]
fn scroll_change_mid_run_is_reported() {
    let mut machine = ProcessStateMachine::new();
    machine.apply_snapshot(snapshot(true, None, &[], false));

    let events = machine.apply_snapshot(snapshot(true, None, &[], true));
    assert_eq!(events, vec![MachineEvent::ScrollModeChanged { active: true }]);
    assert_eq!(machine.view().scroll_button_label, "Pause scroll");

    let events = machine.apply_snapshot(snapshot(true, None, &[], true));
    assert!(events.is_empty());

    let events = machine.apply_snapshot(snapshot(true, None, &[], false));
    assert_eq!(events, vec![MachineEvent::ScrollModeChanged { active: false }]);
}

#[test]
fn identical_snapshots_never_accumulate_log_lines() {
    let mut machine = ProcessStateMachine::new();
    let lines = ["=== SCRAPER STARTED ===", "page 1", "page 2"];
    for _ in 0..10 {
        machine.apply_snapshot(snapshot(true, Some("SCRAPER"), &lines, false));
    }
    assert_eq!(machine.view().log.len(), lines.len());
}

#[test]
fn running_snapshot_without_task_uses_placeholder() {
    let mut machine = ProcessStateMachine::new();
    machine.apply_snapshot(snapshot(true, None, &[], false));
    assert_eq!(machine.view().task_label, "Running...");
    assert_eq!(machine.view().status_label, "Active");
}

#[test]
fn controls_gate_commands() {
    let mut machine = ProcessStateMachine::new();
    let idle = machine.controls();
    assert!(idle.allows(Command::Start));
    assert!(idle.allows(Command::Export(ExportKind::Spreadsheet)));
    assert!(idle.allows(Command::OpenBrowser));
    assert!(!idle.allows(Command::Stop));

    machine.apply_snapshot(snapshot(true, None, &[], false));
    let running = machine.controls();
    assert!(!running.allows(Command::Start));
    assert!(!running.allows(Command::Export(ExportKind::Spreadsheet)));
    assert!(running.allows(Command::Stop));
    assert!(running.allows(Command::ToggleScroll));
    assert!(running.allows(Command::SendEnter));
    assert!(running.allows(Command::OpenBrowser));
}

#[test]
fn clear_then_next_snapshot_restores_log() {
    let mut machine = ProcessStateMachine::new();
    machine.apply_snapshot(snapshot(true, None, &["a", "b"], false));
    machine.clear_display();
    assert!(machine.view().log.is_empty());
    assert!(machine.state().is_running());

    machine.apply_snapshot(snapshot(true, None, &["a", "b", "c"], false));
    assert_eq!(machine.view().log.len(), 3);
}

#[test]
fn reset_returns_to_idle() {
    let mut machine = ProcessStateMachine::new();
    machine.apply_snapshot(snapshot(true, Some("x"), &["a"], true));
    machine.reset();
    assert_eq!(machine.state().phase, ProcessPhase::Idle);
    assert!(machine.view().log.is_empty());
    assert!(!machine.state().auto_scroll);
}
