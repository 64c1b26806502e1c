//! Pingwrap -- healthchecks.io status-reporting runner
//!
//! Wraps one unit of work, pings a healthchecks.io check when the work
//! starts, and pings success or failure when it ends. Reporting never
//! fails the caller: the only signal is a boolean saying whether the
//! terminal ping was delivered.

pub mod config;
pub mod ping;
pub mod runner;
pub mod transport;
pub mod types;
pub mod verify;

pub use runner::{create_runner, create_runner_with_timeout, CheckRunner};
pub use types::{PingKind, ScriptStatus, Transport};
pub use verify::InstanceMarkers;
