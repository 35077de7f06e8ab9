//! The singleton process slot.
//!
//! At most one job (scraper or export) runs at a time. The slot owns the
//! child's stdin for one-shot input, a bounded transcript fed from the
//! child's stdout and stderr, and the auto-scroll flag.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin};
use tokio::sync::oneshot;

use crate::config::{JobConfig, SupervisorConfig};
use crate::status::StatusSnapshot;

use super::error::SupervisorError;

const PUMP_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Transcript retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLimits {
    /// Trim once the transcript grows past this many lines.
    pub capacity: usize,
    /// Lines kept after a trim.
    pub trim_to: usize,
    /// Lines reported in a status snapshot.
    pub tail: usize,
}

impl From<&SupervisorConfig> for LogLimits {
    fn from(config: &SupervisorConfig) -> Self {
        Self {
            capacity: config.log_capacity,
            trim_to: config.log_trim_to,
            tail: config.status_tail,
        }
    }
}

impl Default for LogLimits {
    fn default() -> Self {
        Self::from(&SupervisorConfig::default())
    }
}

#[derive(Default)]
struct SlotState {
    running: bool,
    task: Option<String>,
    auto_scroll: bool,
    log: Vec<String>,
    kill: Option<oneshot::Sender<()>>,
}

#[derive(Clone)]
pub struct ProcessSlot {
    state: Arc<Mutex<SlotState>>,
    stdin: Arc<tokio::sync::Mutex<Option<ChildStdin>>>,
    limits: LogLimits,
}

impl ProcessSlot {
    pub fn new(limits: LogLimits) -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState::default())),
            stdin: Arc::new(tokio::sync::Mutex::new(None)),
            limits,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        let state = self.state.lock();
        let start = state.log.len().saturating_sub(self.limits.tail);
        StatusSnapshot {
            running: state.running,
            task: state.task.clone(),
            log: state.log[start..].to_vec(),
            auto_scroll: state.auto_scroll,
        }
    }

    pub fn push_log(&self, line: impl Into<String>) {
        let mut state = self.state.lock();
        push_line(&mut state.log, line.into(), self.limits);
    }

    /// Launch `job` into the slot.
    ///
    /// # Errors
    /// `Busy` if another job holds the slot; `Spawn` if the program could
    /// not be started (the slot is released again).
    pub async fn launch(&self, job: &JobConfig) -> Result<(), SupervisorError> {
        {
            let mut state = self.state.lock();
            if state.running {
                return Err(SupervisorError::Busy);
            }
            state.running = true;
            state.task = Some(job.label.clone());
            state.auto_scroll = false;
            push_line(
                &mut state.log,
                format!("=== {} STARTED ===", job.label),
                self.limits,
            );
        }

        let mut command = tokio::process::Command::new(&job.program);
        command
            .args(&job.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                tracing::warn!(label = %job.label, program = %job.program, error = %source, "Launch failed");
                self.push_log(format!("[ERROR] Failed to launch {}: {}", job.label, source));
                self.release();
                return Err(SupervisorError::Spawn {
                    label: job.label.clone(),
                    source,
                });
            }
        };

        *self.stdin.lock().await = child.stdin.take();
        let (kill_tx, kill_rx) = oneshot::channel();
        self.state.lock().kill = Some(kill_tx);

        tracing::info!(label = %job.label, pid = ?child.id(), "Process launched");
        let slot = self.clone();
        let label = job.label.clone();
        tokio::spawn(async move { slot.supervise(child, kill_rx, label).await });
        Ok(())
    }

    /// Write a bare newline to the running process.
    pub async fn send_enter(&self) -> Result<(), SupervisorError> {
        if !self.is_running() {
            return Err(SupervisorError::NoProcess);
        }
        let mut stdin = self.stdin.lock().await;
        let pipe = stdin.as_mut().ok_or(SupervisorError::NoProcess)?;
        pipe.write_all(b"\n").await?;
        pipe.flush().await?;
        drop(stdin);

        self.push_log("[INPUT] Enter sent to process");
        Ok(())
    }

    /// Flip auto-scroll and tell the process. Returns the new mode.
    pub async fn toggle_auto_scroll(&self) -> Result<bool, SupervisorError> {
        if !self.is_running() {
            return Err(SupervisorError::NotRunning);
        }
        let mut stdin = self.stdin.lock().await;
        let pipe = stdin.as_mut().ok_or(SupervisorError::NotResponding)?;
        pipe.write_all(b"s\n").await?;
        pipe.flush().await?;
        drop(stdin);

        let mut state = self.state.lock();
        state.auto_scroll = !state.auto_scroll;
        let active = state.auto_scroll;
        let mode = if active { "ENABLED" } else { "PAUSED" };
        push_line(
            &mut state.log,
            format!("[CONTROL] Auto-scroll {}", mode),
            self.limits,
        );
        Ok(active)
    }

    /// Ask the running process to terminate. The slot is released once the
    /// process has actually exited.
    pub fn stop(&self) -> Result<(), SupervisorError> {
        let mut state = self.state.lock();
        let kill = state.kill.take().ok_or(SupervisorError::NothingToStop)?;
        if kill.send(()).is_err() {
            tracing::debug!("Stop requested after process already exited");
        }
        state.auto_scroll = false;
        push_line(&mut state.log, "[STOP] Stopped by user".to_string(), self.limits);
        tracing::info!("Process stop requested");
        Ok(())
    }

    /// Kill whatever is running without logging a user stop.
    pub fn shutdown(&self) {
        if let Some(kill) = self.state.lock().kill.take() {
            let _ = kill.send(());
        }
    }

    async fn supervise(self, mut child: Child, kill_rx: oneshot::Receiver<()>, label: String) {
        let pumps: Vec<_> = [
            child.stdout.take().map(|out| tokio::spawn(pump_lines(out, self.clone()))),
            child.stderr.take().map(|err| tokio::spawn(pump_lines(err, self.clone()))),
        ]
        .into_iter()
        .flatten()
        .collect();

        let status = tokio::select! {
            status = child.wait() => status,
            _ = kill_rx => {
                if let Err(err) = child.start_kill() {
                    tracing::debug!(error = %err, "Kill failed (process likely gone)");
                }
                child.wait().await
            }
        };

        for pump in pumps {
            if tokio::time::timeout(PUMP_DRAIN_TIMEOUT, pump).await.is_err() {
                tracing::debug!(label = %label, "Output pipe still open after exit");
            }
        }

        match status {
            Ok(status) => {
                tracing::info!(label = %label, %status, "Process exited");
                self.push_log(format!("=== {} FINISHED ===", label));
            }
            Err(err) => {
                tracing::warn!(label = %label, error = %err, "Waiting on process failed");
                self.push_log(format!("[ERROR] {}: {}", label, err));
            }
        }

        *self.stdin.lock().await = None;
        self.release();
    }

    fn release(&self) {
        let mut state = self.state.lock();
        state.running = false;
        state.task = None;
        state.auto_scroll = false;
        state.kill = None;
    }
}

impl Default for ProcessSlot {
    fn default() -> Self {
        Self::new(LogLimits::default())
    }
}

async fn pump_lines<R>(reader: R, slot: ProcessSlot)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim();
                if !line.is_empty() {
                    slot.push_log(line);
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "Output pipe read failed");
                break;
            }
        }
    }
}

fn push_line(log: &mut Vec<String>, line: String, limits: LogLimits) {
    log.push(line);
    if log.len() > limits.capacity {
        let excess = log.len() - limits.trim_to;
        log.drain(..excess);
    }
}
