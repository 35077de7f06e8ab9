//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_supervisor;
pub mod scripted_api;

use scrape_console::config::{Config, JobConfig};
use scrape_console::status::StatusSnapshot;

/// Config pointing the console at `base_url` with fast timeouts.
pub fn console_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.console.base_url = base_url.to_string();
    config.console.request_timeout_ms = 2000;
    config.console.connect_timeout_ms = 500;
    config
}

/// Config whose scraper job is `cat`, which stays alive until killed and
/// echoes whatever is written to its stdin.
pub fn cat_supervisor_config() -> Config {
    let mut config = Config::default();
    config.supervisor.bind_addr = "127.0.0.1:0".to_string();
    config.supervisor.scraper = JobConfig {
        program: "cat".to_string(),
        args: Vec::new(),
        label: "CAT".to_string(),
    };
    config.supervisor.export = JobConfig {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "echo exported".to_string()],
        label: "EXPORT".to_string(),
    };
    config.supervisor.browser.candidates = Vec::new();
    config
}

pub fn snapshot(running: bool, task: Option<&str>, log: &[&str], auto_scroll: bool) -> StatusSnapshot {
    StatusSnapshot {
        running,
        task: task.map(str::to_string),
        log: log.iter().map(|line| line.to_string()).collect(),
        auto_scroll,
    }
}
