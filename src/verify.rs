//! Instance Verification
//!
//! Optional hardening layer that probes a base URL before any pings are
//! sent, to confirm it actually addresses a running healthchecks.io
//! instance rather than some arbitrary host. The checks scrape marker
//! substrings out of the instance's landing page and "not found" error
//! page, so the markers are configuration, not protocol: a new service
//! release may change them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{Transport, TransportError};

/// Marker substrings identifying a genuine instance, plus the probe
/// path that is expected to be missing on a real deployment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceMarkers {
    /// Substring the landing page body must contain.
    pub landing_marker: String,
    /// Substring the instance's "not found" error page must contain.
    pub not_found_marker: String,
    /// Sub-path probed on the base URL; must not exist on the instance.
    pub missing_probe_path: String,
}

impl Default for InstanceMarkers {
    fn default() -> Self {
        // Matches the hosted healthchecks.io pages at the time of
        // writing. Self-hosted or newer instances may need overrides.
        Self {
            landing_marker: "healthchecks".to_string(),
            not_found_marker: "Page not found".to_string(),
            missing_probe_path: "pingwrap-instance-probe".to_string(),
        }
    }
}

/// Check whether `base_url` addresses a genuine running instance.
///
/// Two independent checks, both of which must pass:
/// 1. the landing page at `base_url` contains the landing marker;
/// 2. a deliberately missing sub-path answers with an HTTP error whose
///    body contains the not-found marker.
///
/// The "not found" answer in check 2 is an expected signal and is
/// inspected rather than treated as a failure. Transport-level errors
/// are propagated to the caller instead of being swallowed; this is
/// deliberately stricter than the ping sender.
pub fn verifies(
    transport: &dyn Transport,
    base_url: &str,
    markers: &InstanceMarkers,
) -> Result<bool> {
    let landing = transport.fetch_page(base_url)?;
    // Only the probe path may answer with an error page; an HTTP error
    // on the landing page itself is a transport failure.
    if !landing.is_success() {
        return Err(TransportError::Status {
            url: base_url.to_string(),
            status: landing.status,
        }
        .into());
    }
    if !landing.body.contains(&markers.landing_marker) {
        warn!(
            "Landing page at {} does not look like a healthchecks instance (no {:?} marker)",
            base_url, markers.landing_marker
        );
        return Ok(false);
    }

    let probe_url = format!("{}/{}", base_url, markers.missing_probe_path);
    let probe = transport.fetch_page(&probe_url)?;

    if probe.is_success() {
        warn!(
            "Probe path {} unexpectedly exists; not a genuine instance",
            probe_url
        );
        return Ok(false);
    }

    if !probe.body.contains(&markers.not_found_marker) {
        warn!(
            "Error page at {} does not carry the {:?} marker",
            probe_url, markers.not_found_marker
        );
        return Ok(false);
    }

    debug!("Verified healthchecks instance at {}", base_url);
    Ok(true)
}
