//! Status snapshots and the fixed-cadence poller that observes them.

mod poller;
mod snapshot;

pub use poller::{StatusPoller, DEFAULT_POLL_INTERVAL};
pub use snapshot::StatusSnapshot;
