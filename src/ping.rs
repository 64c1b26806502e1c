//! Ping Sender
//!
//! Delivers a single status ping to a healthchecks.io check. A ping is
//! one GET against `{base_url}/{suffix}` with the status message as an
//! optional raw body. Transport failures are logged and folded into a
//! `false` return; nothing propagates to the caller.

use tracing::{error, info};

use crate::types::{PingKind, Transport};

/// Send one ping of the given kind to the check at `base_url`.
///
/// An empty message sends no request body, matching what the service
/// expects for bare pings. Returns whether the ping was delivered.
pub fn send_ping(
    transport: &dyn Transport,
    kind: PingKind,
    base_url: &str,
    message: &str,
) -> bool {
    let url = kind.endpoint(base_url);
    let body = if message.is_empty() {
        None
    } else {
        Some(message.as_bytes())
    };

    match transport.fetch(&url, body) {
        Ok(()) => {
            info!("Pinged a {} to {}", kind, url);
            true
        }
        Err(e) => {
            error!(
                "Healthchecks {} ping with message {:?} failed due to: {}",
                kind, message, e
            );
            false
        }
    }
}
