use std::time::{Duration, Instant};

use crate::client::Command;
use crate::dispatch::Notification;
use crate::machine::{appended_lines, ConsoleView, Controls, MachineEvent, ProcessStateMachine};
use crate::status::StatusSnapshot;

struct Toast {
    notification: Notification,
    shown_at: Instant,
}

pub struct App {
    should_quit: bool,
    machine: ProcessStateMachine,
    toast: Option<Toast>,
    toast_ttl: Duration,
    /// Lines scrolled up from the tail. Zero follows new output.
    log_offset: usize,
}

impl App {
    pub fn new(toast_ttl: Duration) -> Self {
        Self {
            should_quit: false,
            machine: ProcessStateMachine::new(),
            toast: None,
            toast_ttl,
            log_offset: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn machine(&self) -> &ProcessStateMachine {
        &self.machine
    }

    pub fn view(&self) -> ConsoleView<'_> {
        self.machine.view()
    }

    pub fn controls(&self) -> Controls {
        self.machine.controls()
    }

    /// Feed a polled snapshot into the state machine.
    pub fn on_snapshot(&mut self, snapshot: StatusSnapshot) -> Vec<MachineEvent> {
        let previous = (self.log_offset > 0).then(|| self.machine.state().log.clone());
        let events = self.machine.apply_snapshot(snapshot);
        for event in &events {
            match event {
                MachineEvent::Started => tracing::info!("Supervised process is running"),
                MachineEvent::Stopped => tracing::info!("Supervised process is idle"),
                MachineEvent::ScrollModeChanged { active } => {
                    tracing::debug!(active, "Auto-scroll mode changed")
                }
            }
        }

        if let Some(previous) = previous {
            // Keep the scrolled-back view on the same lines while output grows.
            let log = &self.machine.state().log;
            let shift = appended_lines(&previous, log);
            self.log_offset = (self.log_offset + shift).min(log.len().saturating_sub(1));
        }
        events
    }

    pub fn on_notification(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(message = %notification.message, "Command failed");
        } else {
            tracing::info!(message = %notification.message, "Command finished");
        }
        self.toast = Some(Toast {
            notification,
            shown_at: Instant::now(),
        });
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.toast.as_ref().map(|toast| &toast.notification)
    }

    pub fn on_tick(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.shown_at.elapsed() >= self.toast_ttl)
        {
            self.toast = None;
        }
    }

    /// Local only; the next poll brings the supervisor's transcript back.
    pub fn clear_log(&mut self) {
        self.machine.clear_display();
        self.log_offset = 0;
    }

    /// Returns `command` when the current state offers it.
    pub fn request(&self, command: Command) -> Option<Command> {
        if self.controls().allows(command) {
            Some(command)
        } else {
            tracing::debug!(command = command.label(), "Command not available in current state");
            None
        }
    }

    pub fn log_offset(&self) -> usize {
        self.log_offset
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let len = self.machine.state().log.len();
        self.log_offset = (self.log_offset + lines).min(len.saturating_sub(1));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.log_offset = self.log_offset.saturating_sub(lines);
    }

    pub fn follow_tail(&mut self) {
        self.log_offset = 0;
    }

    /// Leave the console: the machine goes back to idle.
    pub fn teardown(&mut self) {
        self.machine.reset();
        self.toast = None;
        self.log_offset = 0;
    }
}
