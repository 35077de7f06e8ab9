//! Terminal console for the supervisor.
//!
//! The TUI is a thin shell around [`crate::machine::ProcessStateMachine`]:
//! snapshots from the poller drive the machine, keys become commands for
//! the dispatcher, and every frame is a projection of the current state.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_session;
pub mod theme;

pub use runtime::run;
