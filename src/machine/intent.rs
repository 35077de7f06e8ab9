//! Intents for the supervisor state machine.

use crate::mvi::Intent;
use crate::status::StatusSnapshot;

#[derive(Debug)]
pub enum MachineIntent {
    /// A status snapshot was observed by the poller.
    ApplySnapshot(StatusSnapshot),

    /// User cleared the displayed transcript. The next snapshot restores it.
    ClearDisplay,

    /// Console view torn down.
    Reset,
}

impl Intent for MachineIntent {}
