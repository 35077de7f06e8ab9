//! Request/response seam to the supervisor facade.
//!
//! Poller and dispatcher are written against [`SupervisorApi`]; the console
//! uses [`HttpSupervisorClient`], tests substitute in-memory fakes.

mod command;
mod error;
mod http;

pub use command::{Ack, Command, CommandReply, ExportKind};
pub use error::TransportError;
pub use http::HttpSupervisorClient;

use async_trait::async_trait;

use crate::status::StatusSnapshot;

/// Request/response contract with the supervisor.
///
/// Commands return only an acknowledgement. Their effect on the supervised
/// process is never assumed from the reply; it is observed on a later
/// [`SupervisorApi::status`] call.
#[async_trait]
pub trait SupervisorApi: Send + Sync {
    /// Fetch the current status snapshot.
    async fn status(&self) -> Result<StatusSnapshot, TransportError>;

    /// Send one imperative command and return the raw acknowledgement.
    ///
    /// Non-2xx replies are returned as `Ok` so callers can tell a singleton
    /// conflict apart from a transport failure.
    async fn send(&self, command: Command) -> Result<CommandReply, TransportError>;
}
