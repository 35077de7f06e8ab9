use serde::{Deserialize, Serialize};

/// Long-running export jobs gated by the same singleton slot as the scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Spreadsheet,
}

/// Imperative commands understood by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Export(ExportKind),
    Stop,
    ToggleScroll,
    SendEnter,
    OpenBrowser,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Export(ExportKind::Spreadsheet) => "export-spreadsheet",
            Command::Stop => "stop",
            Command::ToggleScroll => "toggle-scroll",
            Command::SendEnter => "send-enter",
            Command::OpenBrowser => "open-browser",
        }
    }

    /// Commands that launch a job and therefore compete for the singleton slot.
    pub fn is_launch(&self) -> bool {
        matches!(self, Command::Start | Command::Export(_))
    }
}

/// JSON acknowledgement body: `{ok, active?, msg?}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn ok_with(msg: impl Into<String>) -> Self {
        Self {
            ok: true,
            active: None,
            msg: Some(msg.into()),
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            active: None,
            msg: Some(msg.into()),
        }
    }
}

/// HTTP status plus the decoded body, if the body was a JSON acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub status: u16,
    pub ack: Option<Ack>,
}

impl CommandReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Another instance already holds the singleton slot.
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }

    /// True when the body explicitly reports `ok: true`.
    pub fn acknowledged(&self) -> bool {
        self.ack.as_ref().is_some_and(|ack| ack.ok)
    }

    pub fn message(&self) -> Option<&str> {
        self.ack.as_ref().and_then(|ack| ack.msg.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_commands_share_the_slot() {
        assert!(Command::Start.is_launch());
        assert!(Command::Export(ExportKind::Spreadsheet).is_launch());
        assert!(!Command::Stop.is_launch());
        assert!(!Command::OpenBrowser.is_launch());
    }

    #[test]
    fn ack_serializes_without_empty_fields() {
        let json = serde_json::to_value(Ack::ok()).expect("serialize");
        assert_eq!(json, serde_json::json!({"ok": true}));
    }

    #[test]
    fn reply_classification() {
        let conflict = CommandReply {
            status: 409,
            ack: Some(Ack::failure("busy")),
        };
        assert!(conflict.is_conflict());
        assert!(!conflict.is_success());
        assert!(!conflict.acknowledged());
        assert_eq!(conflict.message(), Some("busy"));

        let bare = CommandReply {
            status: 204,
            ack: None,
        };
        assert!(bare.is_success());
        assert!(!bare.acknowledged());
        assert_eq!(bare.message(), None);
    }
}
