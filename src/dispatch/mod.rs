//! Imperative commands and the interpretation of their acknowledgements.
//!
//! Every operation is a single request/response exchange, is never retried,
//! and always resolves to a [`Notification`]. Nothing here mutates the
//! supervisor state: the next poll is the only source of truth.

mod notification;

pub use notification::{Notification, NotificationLevel};

use std::sync::Arc;

use crate::client::{Command, CommandReply, ExportKind, SupervisorApi};

pub const ALREADY_RUNNING: &str = "A process is already running";

#[derive(Clone)]
pub struct CommandDispatcher {
    api: Arc<dyn SupervisorApi>,
}

impl CommandDispatcher {
    pub fn new(api: Arc<dyn SupervisorApi>) -> Self {
        Self { api }
    }

    /// Request a scraper launch. A singleton conflict is informational.
    pub async fn start(&self) -> Notification {
        self.dispatch(Command::Start).await
    }

    /// Request termination. The process is only believed stopped once a
    /// snapshot says so.
    pub async fn stop(&self) -> Notification {
        self.dispatch(Command::Stop).await
    }

    pub async fn toggle_auto_scroll(&self) -> Notification {
        self.dispatch(Command::ToggleScroll).await
    }

    pub async fn send_enter(&self) -> Notification {
        self.dispatch(Command::SendEnter).await
    }

    pub async fn open_external_browser(&self) -> Notification {
        self.dispatch(Command::OpenBrowser).await
    }

    /// Launch an export job through the same singleton gate as `start`.
    pub async fn run_export(&self, kind: ExportKind) -> Notification {
        self.dispatch(Command::Export(kind)).await
    }

    pub async fn dispatch(&self, command: Command) -> Notification {
        tracing::info!(command = command.label(), "Dispatching command");
        let notification = match self.api.send(command).await {
            Ok(reply) => interpret(command, &reply),
            Err(err) => {
                tracing::warn!(command = command.label(), error = %err, "Command request failed");
                Notification::error(failure_text(command))
            }
        };

        if notification.is_error() {
            tracing::warn!(command = command.label(), message = %notification.message, "Command rejected");
        }
        notification
    }
}

/// Turn a raw acknowledgement into the notification shown to the user.
pub fn interpret(command: Command, reply: &CommandReply) -> Notification {
    match command {
        Command::Start | Command::Export(_) => launch_outcome(command, reply),
        _ if !reply.is_success() || !reply.acknowledged() => rejection(command, reply),
        Command::Stop => Notification::success("Process stopped"),
        Command::SendEnter => Notification::success("Enter sent"),
        Command::OpenBrowser => Notification::success("Browser opened"),
        Command::ToggleScroll => {
            let active = reply.ack.as_ref().and_then(|ack| ack.active).unwrap_or(false);
            if active {
                Notification::success("Auto-scroll enabled")
            } else {
                Notification::success("Auto-scroll paused")
            }
        }
    }
}

fn launch_outcome(command: Command, reply: &CommandReply) -> Notification {
    if reply.is_conflict() {
        return Notification::info(ALREADY_RUNNING);
    }
    if !reply.is_success() {
        return rejection(command, reply);
    }
    match command {
        Command::Export(ExportKind::Spreadsheet) => Notification::info("Generating spreadsheet..."),
        _ => Notification::success("Scraper started"),
    }
}

fn rejection(command: Command, reply: &CommandReply) -> Notification {
    match reply.message() {
        Some(msg) => Notification::error(format!("Error: {}", msg)),
        None => Notification::error(format!(
            "{} (HTTP {})",
            failure_text(command),
            reply.status
        )),
    }
}

fn failure_text(command: Command) -> &'static str {
    match command {
        Command::Start => "Failed to start scraper",
        Command::Export(_) => "Failed to start export",
        Command::Stop => "Failed to stop process",
        Command::ToggleScroll => "Failed to toggle auto-scroll",
        Command::SendEnter => "Failed to send Enter",
        Command::OpenBrowser => "Failed to open browser",
    }
}
