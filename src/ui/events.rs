use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

const INPUT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Terminal input read on a dedicated thread and forwarded to the async loop.
///
/// crossterm's `read` blocks, so the thread polls with a short timeout to
/// notice when the reader is dropped.
pub struct InputReader {
    rx: mpsc::Receiver<AppEvent>,
    stop: Arc<AtomicBool>,
}

impl InputReader {
    pub fn spawn(poll_timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        thread::spawn(move || read_loop(tx, thread_stop, poll_timeout));

        Self { rx, stop }
    }

    /// Next input event, or `None` once the reader thread has exited.
    pub async fn recv(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn read_loop(tx: mpsc::Sender<AppEvent>, stop: Arc<AtomicBool>, poll_timeout: Duration) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(poll_timeout) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => {
                tracing::warn!(error = %err, "Terminal input poll failed");
                break;
            }
        }

        let app_event = match event::read() {
            Ok(Event::Key(key)) => AppEvent::Key(key),
            Ok(Event::Resize(cols, rows)) => AppEvent::Resize(cols, rows),
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(error = %err, "Terminal input read failed");
                break;
            }
        };

        if tx.blocking_send(app_event).is_err() {
            break;
        }
    }
    tracing::debug!("Input reader stopped");
}
