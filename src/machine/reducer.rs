//! Reducer for the supervisor state machine.

use crate::mvi::Reducer;

use super::intent::MachineIntent;
use super::state::{ProcessPhase, SupervisorState};

/// Pure transition function. Event detection lives in
/// [`super::ProcessStateMachine`], which compares states around the call.
pub struct ProcessReducer;

impl Reducer for ProcessReducer {
    type State = SupervisorState;
    type Intent = MachineIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MachineIntent::ApplySnapshot(snapshot) => {
                let phase = if snapshot.running {
                    ProcessPhase::Running
                } else {
                    ProcessPhase::Idle
                };
                let task = if snapshot.running { snapshot.task } else { None };

                SupervisorState {
                    phase,
                    // Stored even when stale so the next running snapshot
                    // does not report a change that never happened.
                    auto_scroll: snapshot.auto_scroll,
                    task,
                    log: snapshot.log,
                    rendered_log_len: state.log.len(),
                }
            }
            MachineIntent::ClearDisplay => SupervisorState {
                log: Vec::new(),
                rendered_log_len: 0,
                ..state
            },
            MachineIntent::Reset => SupervisorState::default(),
        }
    }
}
