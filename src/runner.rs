//! Check Runner
//!
//! Orchestrates one run-report cycle: optionally verify the instance,
//! ping "start", run the wrapped work exactly once, translate its
//! outcome into a terminal ping, and surface only the terminal ping's
//! delivery as a boolean. A reporting failure never becomes the
//! caller's failure.

use std::time::Duration;

use anyhow::Result;
use tracing::error;

use crate::ping::send_ping;
use crate::transport::HttpTransport;
use crate::types::{PingKind, ScriptStatus, Transport};
use crate::verify::{verifies, InstanceMarkers};

/// Runs one unit of work and reports its status to a healthchecks.io
/// check. Holds nothing but the check address, the transport, and the
/// optional verification markers; every `run` call is self-contained.
pub struct CheckRunner {
    transport: Box<dyn Transport>,
    base_url: String,
    markers: Option<InstanceMarkers>,
}

/// Create a runner for the check at `base_url` with the default
/// 10-second ping timeout and no instance verification.
pub fn create_runner(base_url: impl Into<String>) -> Result<CheckRunner> {
    let transport = HttpTransport::with_default_timeout()?;
    Ok(CheckRunner::with_transport(Box::new(transport), base_url))
}

/// Create a runner with an explicit ping timeout.
pub fn create_runner_with_timeout(
    base_url: impl Into<String>,
    timeout: Duration,
) -> Result<CheckRunner> {
    let transport = HttpTransport::new(timeout)?;
    Ok(CheckRunner::with_transport(Box::new(transport), base_url))
}

impl CheckRunner {
    /// Build a runner over an arbitrary transport.
    pub fn with_transport(transport: Box<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            markers: None,
        }
    }

    /// Enable instance verification before any ping is attempted.
    pub fn verify_instance(mut self, markers: InstanceMarkers) -> Self {
        self.markers = Some(markers);
        self
    }

    /// Run `work` and report its outcome to the check.
    ///
    /// Sends a start ping (its failure is logged by the sender but does
    /// not abort the run), invokes `work` exactly once, then sends a
    /// success or fail ping carrying the outcome's message. A `work`
    /// error is folded into a fail ping whose message is the rendered
    /// error chain.
    ///
    /// Returns whether the terminal ping was delivered. When instance
    /// verification is enabled and does not pass, `work` still runs for
    /// its side effects, no ping is sent, and the result is `false`.
    pub fn run<F>(&self, work: F) -> bool
    where
        F: FnOnce() -> Result<ScriptStatus>,
    {
        if let Some(markers) = &self.markers {
            let genuine = match verifies(self.transport.as_ref(), &self.base_url, markers) {
                Ok(genuine) => genuine,
                Err(e) => {
                    error!("Instance verification of {} failed: {:#}", self.base_url, e);
                    false
                }
            };
            if !genuine {
                error!(
                    "{} does not address a genuine healthchecks instance; running work unreported",
                    self.base_url
                );
                let _ = work();
                return false;
            }
        }

        send_ping(self.transport.as_ref(), PingKind::Start, &self.base_url, "");

        match work() {
            Ok(status) => {
                let kind = if status.is_success() {
                    PingKind::Success
                } else {
                    PingKind::Fail
                };
                send_ping(self.transport.as_ref(), kind, &self.base_url, status.message())
            }
            Err(e) => send_ping(
                self.transport.as_ref(),
                PingKind::Fail,
                &self.base_url,
                &format!("{:#}", e),
            ),
        }
    }
}
