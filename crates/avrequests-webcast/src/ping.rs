//! The webcast ping client.
//!
//! The external webcast system only needs a trigger signal: a single GET
//! with no payload. A missing URL disables the ping entirely, and
//! [`WebcastPinger::send_ping`] swallows failures so a notification problem
//! never blocks the user-facing action that triggered it.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use avrequests_core::AvSettings;

/// How long a ping request may take before it is abandoned.
pub const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// An error from sending the webcast ping.
#[derive(Debug, Error)]
pub enum PingError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("webcast ping request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("webcast ping returned status {status}")]
    Status { status: StatusCode },
}

/// Sends trigger pings to the configured webcast endpoint.
///
/// The client times out after [`PING_TIMEOUT`] and does not verify TLS
/// certificates, matching what the webcast endpoint historically requires.
#[derive(Debug, Clone)]
pub struct WebcastPinger {
    client: Client,
    url: Option<Url>,
}

impl WebcastPinger {
    /// Creates a pinger for the given URL. `None` makes every ping a no-op.
    pub fn new(url: Option<Url>) -> Result<Self, PingError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(PING_TIMEOUT)
            .build()
            .map_err(PingError::Client)?;
        Ok(Self { client, url })
    }

    /// Creates a pinger from the plugin settings.
    pub fn from_settings(settings: &AvSettings) -> Result<Self, PingError> {
        Self::new(settings.webcast_ping_url.clone())
    }

    /// Returns true if a ping URL is configured.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Sends the ping, returning whether a request was made.
    ///
    /// Returns `Ok(false)` without any network activity when no URL is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success HTTP status.
    pub async fn try_send_ping(&self) -> Result<bool, PingError> {
        let Some(url) = &self.url else {
            return Ok(false);
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(PingError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PingError::Status { status });
        }
        Ok(true)
    }

    /// Sends a ping notification when a webcast request changes.
    ///
    /// Failures are logged at error severity and swallowed. Callers are
    /// expected to register this through a post-commit hook so the remote
    /// side never reads pre-commit state.
    pub async fn send_ping(&self) {
        let Some(url) = &self.url else {
            return;
        };
        info!(url = %url, "Sending webcast ping");
        if let Err(e) = self.try_send_ping().await {
            error!(error = %e, "Could not send webcast ping");
        }
    }
}
