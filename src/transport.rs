//! Blocking HTTP Transport
//!
//! `reqwest::blocking` implementation of the `Transport` trait. One
//! client, one fixed timeout, no retries; every ping is a single
//! attempt that either lands or is reported as failed.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

use crate::types::{FetchedPage, Transport, TransportError};

/// Client-side timeout applied to every request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Blocking HTTP transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build blocking HTTP client")?;
        Ok(Self { client })
    }

    /// Build a transport with the default 10-second timeout.
    pub fn with_default_timeout() -> Result<Self> {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str, body: Option<&[u8]>) -> Result<(), TransportError> {
        // healthchecks.io accepts GET pings; the message rides along as
        // a raw request body when present.
        let mut builder = self.client.get(url);
        if let Some(bytes) = body {
            builder = builder.body(bytes.to_vec());
        }

        let resp = builder.send().map_err(|e| TransportError::Request {
            url: url.to_string(),
            source: e,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        debug!("Fetched {} -> {}", url, status.as_u16());
        Ok(())
    }

    fn fetch_page(&self, url: &str) -> Result<FetchedPage, TransportError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| TransportError::Request {
            url: url.to_string(),
            source: e,
        })?;

        debug!("Fetched page {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchedPage { status, body })
    }
}
