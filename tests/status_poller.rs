mod common;

use std::sync::Arc;
use std::time::Duration;

use common::scripted_api::{Scripted, ScriptedApi};
use common::snapshot;
use scrape_console::machine::{MachineEvent, ProcessStateMachine};
use scrape_console::status::{StatusPoller, StatusSnapshot, DEFAULT_POLL_INTERVAL};
use tokio::sync::mpsc;
use tokio::time::sleep;

const PERIOD: Duration = Duration::from_millis(800);

fn poller(api: &Arc<ScriptedApi>) -> (StatusPoller, mpsc::Receiver<StatusSnapshot>) {
    let (tx, rx) = mpsc::channel(64);
    (StatusPoller::new(api.clone(), PERIOD, tx), rx)
}

fn drain(rx: &mut mpsc::Receiver<StatusSnapshot>) -> Vec<StatusSnapshot> {
    let mut received = Vec::new();
    while let Ok(snapshot) = rx.try_recv() {
        received.push(snapshot);
    }
    received
}

fn idle() -> StatusSnapshot {
    snapshot(false, None, &[], false)
}

#[test]
fn default_cadence_is_800ms() {
    assert_eq!(DEFAULT_POLL_INTERVAL, Duration::from_millis(800));
}

#[tokio::test(start_paused = true)]
async fn first_poll_happens_one_period_after_start() {
    let api = Arc::new(ScriptedApi::new(idle()));
    let (mut poller, mut rx) = poller(&api);

    poller.start();
    assert!(poller.is_active());

    sleep(Duration::from_millis(799)).await;
    assert_eq!(api.status_calls(), 0);

    sleep(Duration::from_millis(2)).await;
    assert_eq!(api.status_calls(), 1);
    assert_eq!(drain(&mut rx).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn restarting_keeps_a_single_schedule() {
    let api = Arc::new(ScriptedApi::new(idle()));
    let (mut poller, mut rx) = poller(&api);

    poller.start();
    poller.start();
    poller.start();

    sleep(PERIOD * 3 + Duration::from_millis(10)).await;
    assert_eq!(api.status_calls(), 3);
    assert_eq!(drain(&mut rx).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn start_start_stop_leaves_no_ticks() {
    let api = Arc::new(ScriptedApi::new(idle()));
    let (mut poller, mut rx) = poller(&api);

    poller.start();
    poller.start();
    poller.stop();
    assert!(!poller.is_active());

    sleep(PERIOD * 10).await;
    assert_eq!(api.status_calls(), 0);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent_and_halts_polling() {
    let api = Arc::new(ScriptedApi::new(idle()));
    let (mut poller, mut rx) = poller(&api);

    poller.stop();
    poller.start();
    sleep(PERIOD * 2 + Duration::from_millis(10)).await;
    assert_eq!(api.status_calls(), 2);

    poller.stop();
    poller.stop();
    sleep(PERIOD * 5).await;
    assert_eq!(api.status_calls(), 2);
    assert_eq!(drain(&mut rx).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_response_does_not_delay_next_tick() {
    let api = Arc::new(ScriptedApi::new(idle()));
    api.push(Scripted::after(
        Duration::from_millis(2000),
        snapshot(true, Some("slow"), &[], false),
    ));
    api.push(Scripted::now(snapshot(true, Some("fast"), &[], false)));
    let (mut poller, mut rx) = poller(&api);

    poller.start();
    sleep(PERIOD * 2 + Duration::from_millis(10)).await;
    assert_eq!(api.status_calls(), 2);

    // Only the fast one has completed so far.
    let received = drain(&mut rx);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].task.as_deref(), Some("fast"));

    sleep(Duration::from_millis(1200)).await;
    let tasks: Vec<_> = drain(&mut rx)
        .into_iter()
        .map(|s| s.task.unwrap_or_default())
        .collect();
    assert!(tasks.contains(&"slow".to_string()));
}

#[tokio::test(start_paused = true)]
async fn response_arriving_after_stop_is_discarded() {
    let api = Arc::new(ScriptedApi::new(idle()));
    api.push(Scripted::after(
        Duration::from_millis(1000),
        snapshot(true, Some("stale"), &["x"], true),
    ));
    let (mut poller, mut rx) = poller(&api);

    poller.start();
    sleep(PERIOD + Duration::from_millis(10)).await;
    assert_eq!(api.status_calls(), 1);

    poller.stop();
    sleep(Duration::from_millis(2000)).await;
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn response_from_previous_schedule_is_discarded_after_restart() {
    let api = Arc::new(ScriptedApi::new(idle()));
    api.push(Scripted::after(
        Duration::from_millis(1500),
        snapshot(true, Some("stale"), &[], false),
    ));
    let (mut poller, mut rx) = poller(&api);

    poller.start();
    sleep(PERIOD + Duration::from_millis(10)).await;
    poller.start();

    sleep(Duration::from_millis(2000)).await;
    let received = drain(&mut rx);
    assert!(!received.is_empty());
    assert!(received.iter().all(|s| s.task.as_deref() != Some("stale")));
}

#[tokio::test(start_paused = true)]
async fn failed_poll_is_skipped_and_next_success_applies() {
    let api = Arc::new(ScriptedApi::new(idle()));
    api.push(Scripted::Failure);
    api.push(Scripted::now(snapshot(true, Some("crawling"), &["a"], false)));
    let (mut poller, mut rx) = poller(&api);
    let mut machine = ProcessStateMachine::new();

    poller.start();
    sleep(PERIOD + Duration::from_millis(10)).await;
    assert_eq!(api.status_calls(), 1);
    assert!(drain(&mut rx).is_empty());
    assert!(!machine.state().is_running());

    sleep(PERIOD).await;
    let mut events = Vec::new();
    for snapshot in drain(&mut rx) {
        events.extend(machine.apply_snapshot(snapshot));
    }
    assert_eq!(events, vec![MachineEvent::Started]);
    assert_eq!(machine.view().task_label, "crawling");
    assert_eq!(machine.view().log, ["a".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_poller_stops_the_schedule() {
    let api = Arc::new(ScriptedApi::new(idle()));
    let (mut poller, _rx) = poller(&api);

    poller.start();
    drop(poller);
    sleep(PERIOD * 3).await;
    assert_eq!(api.status_calls(), 0);
}
