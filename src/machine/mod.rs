//! Client-side process state machine.
//!
//! Owns the single authoritative [`SupervisorState`]. Only observed
//! snapshots move it between phases; commands never touch it directly.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Phase enum (Idle → Running → Idle) plus last snapshot data
//! - `intent.rs` - ApplySnapshot, ClearDisplay, Reset
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `projection.rs` - Control enablement and labels derived from state

mod intent;
mod projection;
mod reducer;
mod state;

pub use intent::MachineIntent;
pub use projection::{ConsoleView, Controls};
pub use reducer::ProcessReducer;
pub use state::{appended_lines, ProcessPhase, SupervisorState};

use crate::mvi::Store;
use crate::status::StatusSnapshot;

/// Edges raised while applying a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineEvent {
    Started,
    Stopped,
    ScrollModeChanged { active: bool },
}

#[derive(Debug, Default)]
pub struct ProcessStateMachine {
    store: Store<ProcessReducer>,
}

impl ProcessStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SupervisorState {
        self.store.state()
    }

    pub fn controls(&self) -> Controls {
        Controls::for_state(self.state())
    }

    pub fn view(&self) -> ConsoleView<'_> {
        ConsoleView::project(self.state())
    }

    /// Apply an observed snapshot and report the edges it caused.
    ///
    /// A scroll-mode change is only reported for running snapshots; a stale
    /// value arriving with `running=false` is stored silently.
    pub fn apply_snapshot(&mut self, snapshot: StatusSnapshot) -> Vec<MachineEvent> {
        let was_running = self.state().is_running();
        let previous_scroll = self.state().auto_scroll;

        self.store.dispatch(MachineIntent::ApplySnapshot(snapshot));

        let state = self.state();
        let mut events = Vec::new();
        match (was_running, state.is_running()) {
            (false, true) => events.push(MachineEvent::Started),
            (true, false) => events.push(MachineEvent::Stopped),
            _ => {}
        }
        if state.is_running() && state.auto_scroll != previous_scroll {
            events.push(MachineEvent::ScrollModeChanged {
                active: state.auto_scroll,
            });
        }
        events
    }

    pub fn clear_display(&mut self) {
        self.store.dispatch(MachineIntent::ClearDisplay);
    }

    pub fn reset(&mut self) {
        self.store.dispatch(MachineIntent::Reset);
    }
}
