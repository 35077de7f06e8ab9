pub mod client;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod machine;
pub mod mvi;
pub mod status;
pub mod supervisor;
pub mod ui;
