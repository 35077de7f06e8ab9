use serde::{Deserialize, Deserializer, Serialize};

/// One polled status payload describing the supervisor at the instant of the request.
///
/// `log` is the most recent complete transcript, not a diff. `task` and
/// `auto_scroll` are only meaningful while `running` is true; a stopped
/// supervisor may still report stale values for them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub log: Vec<String>,
    #[serde(default, alias = "autoScroll")]
    pub auto_scroll: bool,
}

impl StatusSnapshot {
    /// Auto-scroll as it may be displayed: never while the process is stopped.
    pub fn effective_auto_scroll(&self) -> bool {
        self.running && self.auto_scroll
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
