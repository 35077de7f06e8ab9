use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::Command;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub supervisor: SupervisorConfig,
}

/// Settings for the operator console (the supervisor's client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the supervisor (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Status polling period in milliseconds (default: 800).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Total request timeout in milliseconds (default: 5000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Connection timeout in milliseconds (default: 2000).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// How long a notification stays on screen (default: 3000).
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,
}

impl ConsoleConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

/// Paths of the supervisor endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub status: String,
    pub start: String,
    pub export: String,
    pub stop: String,
    pub toggle_scroll: String,
    pub enter: String,
    pub open_browser: String,
}

impl Endpoints {
    pub fn path_for(&self, command: Command) -> &str {
        match command {
            Command::Start => &self.start,
            Command::Export(_) => &self.export,
            Command::Stop => &self.stop,
            Command::ToggleScroll => &self.toggle_scroll,
            Command::SendEnter => &self.enter,
            Command::OpenBrowser => &self.open_browser,
        }
    }

    pub fn all(&self) -> [(&'static str, &str); 7] {
        [
            ("status", &self.status),
            ("start", &self.start),
            ("export", &self.export),
            ("stop", &self.stop),
            ("toggle_scroll", &self.toggle_scroll),
            ("enter", &self.enter),
            ("open_browser", &self.open_browser),
        ]
    }
}

/// Settings for the `serve` side: the process slot and what it launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Bind address for the supervisor HTTP server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Log lines kept before trimming (default: 1000).
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    /// Lines kept after a trim (default: 500).
    #[serde(default = "default_log_trim_to")]
    pub log_trim_to: usize,
    /// Lines returned by the status endpoint (default: 200).
    #[serde(default = "default_status_tail")]
    pub status_tail: usize,
    #[serde(default = "default_scraper_job")]
    pub scraper: JobConfig,
    #[serde(default = "default_export_job")]
    pub export: JobConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// A program launched into the process slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Label shown as the task while the job runs.
    pub label: String,
}

/// Companion browser the scraper attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Executables tried in order; the first that exists is launched.
    pub candidates: Vec<PathBuf>,
    pub args: Vec<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_poll_interval_ms() -> u64 {
    800
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_connect_timeout_ms() -> u64 {
    2000
}

fn default_notification_ttl_ms() -> u64 {
    3000
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_log_capacity() -> usize {
    1000
}

fn default_log_trim_to() -> usize {
    500
}

fn default_status_tail() -> usize {
    200
}

fn default_scraper_job() -> JobConfig {
    JobConfig {
        program: "python".to_string(),
        args: vec!["scraper.py".to_string()],
        label: "SCRAPER".to_string(),
    }
}

fn default_export_job() -> JobConfig {
    JobConfig {
        program: "python".to_string(),
        args: vec!["post-scrp1.py".to_string()],
        label: "EXPORT SPREADSHEET".to_string(),
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            status: "/scraper/status".to_string(),
            start: "/scraper/run".to_string(),
            export: "/scraper/excel".to_string(),
            stop: "/scraper/stop".to_string(),
            toggle_scroll: "/scraper/toggle-scroll".to_string(),
            enter: "/scraper/enter".to_string(),
            open_browser: "/scraper/open-chrome".to_string(),
        }
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_capacity: default_log_capacity(),
            log_trim_to: default_log_trim_to(),
            status_tail: default_status_tail(),
            scraper: default_scraper_job(),
            export: default_export_job(),
            browser: BrowserConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                PathBuf::from("/usr/bin/google-chrome"),
                PathBuf::from("/usr/bin/chromium"),
                PathBuf::from("/usr/bin/chromium-browser"),
                PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
                PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
            ],
            args: vec!["--remote-debugging-port=9222".to_string()],
        }
    }
}
