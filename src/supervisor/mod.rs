//! Supervisor facade: the HTTP service that owns the singleton process slot.
//!
//! Serves the same contract the console consumes (see [`crate::client`]).

mod browser;
mod error;
mod routes;
mod server;
mod shutdown;
mod slot;

pub use browser::BrowserLauncher;
pub use error::{ServeError, SupervisorError};
pub use routes::{build_router, SupervisorContext};
pub use server::{SupervisorHandle, SupervisorServer};
pub use shutdown::ShutdownManager;
pub use slot::{LogLimits, ProcessSlot};
