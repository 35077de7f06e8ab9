//! Read-only projection of [`SupervisorState`] into what the console shows.

use crate::client::Command;

use super::state::SupervisorState;

/// Which commands the console currently offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub export: bool,
    pub stop: bool,
    pub toggle_scroll: bool,
    pub send_enter: bool,
    pub open_browser: bool,
}

impl Controls {
    pub fn for_state(state: &SupervisorState) -> Self {
        let running = state.is_running();
        Self {
            start: !running,
            export: !running,
            stop: running,
            toggle_scroll: running,
            send_enter: running,
            open_browser: true,
        }
    }

    pub fn allows(&self, command: Command) -> bool {
        match command {
            Command::Start => self.start,
            Command::Export(_) => self.export,
            Command::Stop => self.stop,
            Command::ToggleScroll => self.toggle_scroll,
            Command::SendEnter => self.send_enter,
            Command::OpenBrowser => self.open_browser,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleView<'a> {
    pub running: bool,
    pub status_label: &'static str,
    pub task_label: &'a str,
    pub scroll_status_visible: bool,
    pub scroll_button_label: &'static str,
    pub controls: Controls,
    pub log: &'a [String],
}

impl<'a> ConsoleView<'a> {
    pub fn project(state: &'a SupervisorState) -> Self {
        let running = state.is_running();
        let task_label = match (running, state.task.as_deref()) {
            (true, Some(task)) => task,
            (true, None) => "Running...",
            (false, _) => "Waiting...",
        };
        let scroll_status_visible = state.effective_auto_scroll();

        Self {
            running,
            status_label: if running { "Active" } else { "Idle" },
            task_label,
            scroll_status_visible,
            scroll_button_label: if scroll_status_visible {
                "Pause scroll"
            } else {
                "Auto scroll"
            },
            controls: Controls::for_state(state),
            log: &state.log,
        }
    }
}
