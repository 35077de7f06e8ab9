mod loader;
mod overrides;
mod types;

pub use loader::{ConfigError, HEALTH_PATH};
pub use overrides::ConfigOverrides;
pub use types::{BrowserConfig, Config, ConsoleConfig, Endpoints, JobConfig, SupervisorConfig};
