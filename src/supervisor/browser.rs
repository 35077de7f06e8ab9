use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::config::BrowserConfig;

use super::error::SupervisorError;

/// Launches the companion browser window the scraper drives.
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    candidates: Vec<PathBuf>,
    args: Vec<String>,
}

impl BrowserLauncher {
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            candidates: config.candidates.clone(),
            args: config.args.clone(),
        }
    }

    /// First candidate executable that exists on disk.
    pub fn locate(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.exists())
    }

    /// Spawn the browser detached. Returns the executable used.
    pub fn launch(&self) -> Result<PathBuf, SupervisorError> {
        let path = self.locate().ok_or(SupervisorError::BrowserNotFound)?;
        tokio::process::Command::new(path)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!(browser = %path.display(), "Browser launched");
        Ok(path.to_path_buf())
    }
}
