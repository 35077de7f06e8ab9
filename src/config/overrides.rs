use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub bind_addr: Option<String>,
}

impl ConfigOverrides {
    /// Apply overrides and re-validate the result.
    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(base_url) = &self.base_url {
            config.console.base_url = base_url.clone();
        }
        if let Some(poll_interval_ms) = self.poll_interval_ms {
            config.console.poll_interval_ms = poll_interval_ms;
        }
        if let Some(bind_addr) = &self.bind_addr {
            config.supervisor.bind_addr = bind_addr.clone();
        }
        config.validate()?;
        Ok(config)
    }
}
