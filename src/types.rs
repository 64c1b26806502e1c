//! Pingwrap - Type Definitions
//!
//! Shared types for the status-reporting client: the outcome value a
//! wrapped script produces, the ping kinds understood by a
//! healthchecks.io instance, and the blocking transport seam.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Script Status ───────────────────────────────────────────────

/// The outcome of one wrapped script run.
///
/// Carried to the monitoring service as the body of the terminal ping.
/// Exactly one of these is produced per run and consumed by the runner
/// to pick the terminal ping kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptStatus {
    /// The script did what it was supposed to do.
    Success(String),
    /// The script completed but reported a problem.
    Failure(String),
}

impl ScriptStatus {
    /// Successful outcome with no message.
    pub fn ok() -> Self {
        ScriptStatus::Success(String::new())
    }

    /// Successful outcome with a message.
    pub fn success(msg: impl Into<String>) -> Self {
        ScriptStatus::Success(msg.into())
    }

    /// Unsuccessful outcome with a message.
    pub fn failure(msg: impl Into<String>) -> Self {
        ScriptStatus::Failure(msg.into())
    }

    /// Whether this outcome is the successful case.
    pub fn is_success(&self) -> bool {
        matches!(self, ScriptStatus::Success(_))
    }

    /// The message carried by either case.
    pub fn message(&self) -> &str {
        match self {
            ScriptStatus::Success(msg) | ScriptStatus::Failure(msg) => msg,
        }
    }
}

// ─── Ping Kinds ──────────────────────────────────────────────────

/// The kinds of pings a healthchecks.io check understands.
///
/// Each kind maps to a fixed endpoint suffix appended to the check's
/// base URL. There is deliberately no "unknown" case: every value of
/// this enum is sendable, so an unsendable ping cannot be requested
/// in the first place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PingKind {
    /// The wrapped script is about to run.
    Start,
    /// The script finished successfully.
    Success,
    /// The script finished unsuccessfully or could not run.
    Fail,
}

impl PingKind {
    /// The endpoint suffix for this kind. Success pings go to the base
    /// URL itself, so its suffix is empty.
    pub fn endpoint_suffix(&self) -> &'static str {
        match self {
            PingKind::Start => "START",
            PingKind::Success => "",
            PingKind::Fail => "FAIL",
        }
    }

    /// The full ping URL for this kind on the given check.
    pub fn endpoint(&self, base_url: &str) -> String {
        format!("{}/{}", base_url, self.endpoint_suffix())
    }
}

impl fmt::Display for PingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PingKind::Start => write!(f, "start"),
            PingKind::Success => write!(f, "success"),
            PingKind::Fail => write!(f, "fail"),
        }
    }
}

// ─── Transport Seam ──────────────────────────────────────────────

/// Error raised by the blocking HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never completed: connect failure, timeout, bad URL.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The request completed but the service answered with an error status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A page fetched for instance verification: status plus body text.
#[derive(Clone, Debug)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// Whether the response carried a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP seam behind the ping sender and the instance verifier.
///
/// Production code uses the `reqwest::blocking` implementation in the
/// transport module; tests substitute a recording mock.
pub trait Transport: Send + Sync {
    /// Fire one ping request at `url` with an optional raw-bytes body.
    /// Ok only when the request completed with a non-error status.
    fn fetch(&self, url: &str, body: Option<&[u8]>) -> Result<(), TransportError>;

    /// Fetch a page for inspection. HTTP error statuses are returned as
    /// a `FetchedPage`, not as errors, so callers can look at error
    /// pages; only transport-level failures become `Err`.
    fn fetch_page(&self, url: &str) -> Result<FetchedPage, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn fetch(&self, url: &str, body: Option<&[u8]>) -> Result<(), TransportError> {
        (**self).fetch(url, body)
    }

    fn fetch_page(&self, url: &str) -> Result<FetchedPage, TransportError> {
        (**self).fetch_page(url)
    }
}

// ─── Logging ─────────────────────────────────────────────────────

/// Verbosity levels accepted by the config file.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_suffixes_match_wire_protocol() {
        assert_eq!(PingKind::Start.endpoint_suffix(), "START");
        assert_eq!(PingKind::Success.endpoint_suffix(), "");
        assert_eq!(PingKind::Fail.endpoint_suffix(), "FAIL");
    }

    #[test]
    fn test_endpoint_is_base_url_plus_suffix() {
        assert_eq!(PingKind::Start.endpoint("http://h"), "http://h/START");
        assert_eq!(PingKind::Success.endpoint("http://h"), "http://h/");
        assert_eq!(PingKind::Fail.endpoint("http://h"), "http://h/FAIL");
    }

    #[test]
    fn test_script_status_message_and_success() {
        let ok = ScriptStatus::success("all good");
        assert!(ok.is_success());
        assert_eq!(ok.message(), "all good");

        let bad = ScriptStatus::failure("bad state");
        assert!(!bad.is_success());
        assert_eq!(bad.message(), "bad state");

        assert_eq!(ScriptStatus::ok().message(), "");
    }

    #[test]
    fn test_fetched_page_success_range() {
        let page = |status| FetchedPage {
            status,
            body: String::new(),
        };
        assert!(page(200).is_success());
        assert!(page(204).is_success());
        assert!(!page(404).is_success());
        assert!(!page(500).is_success());
    }
}
