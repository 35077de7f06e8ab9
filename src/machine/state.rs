//! Supervisor state as believed by the console.

use crate::mvi::UiState;

/// Lifecycle phase of the supervised process.
///
/// `Stopping` exists for completeness of the model only: a stop command is
/// fire-and-forget and the reducer goes straight from `Running` to `Idle`
/// once a snapshot reports the process gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessPhase {
    #[default]
    Idle,
    Running,
    Stopping,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupervisorState {
    pub phase: ProcessPhase,
    /// Last auto-scroll value reported by the supervisor, stale or not.
    pub auto_scroll: bool,
    /// Current activity; only kept while running.
    pub task: Option<String>,
    /// Displayed transcript. Replaced wholesale by every snapshot.
    pub log: Vec<String>,
    /// Transcript length before the latest snapshot was applied.
    pub rendered_log_len: usize,
}

impl UiState for SupervisorState {}

impl SupervisorState {
    pub fn is_running(&self) -> bool {
        self.phase == ProcessPhase::Running
    }

    /// Auto-scroll as it may be shown: never while the process is not running.
    pub fn effective_auto_scroll(&self) -> bool {
        self.is_running() && self.auto_scroll
    }

}

/// Lines appended to `previous` to produce `current`.
///
/// The supervisor only serves the tail of its buffer, so older lines may have
/// dropped off the front. The shift is found by locating the end of
/// `previous` inside `current`; with no overlap every line counts as new.
pub fn appended_lines(previous: &[String], current: &[String]) -> usize {
    if previous.is_empty() {
        return current.len();
    }
    (0..current.len())
        .rev()
        .find(|&end| {
            let overlap = (end + 1).min(previous.len());
            current[end + 1 - overlap..=end] == previous[previous.len() - overlap..]
        })
        .map_or(current.len(), |end| current.len() - 1 - end)
}
