//! ThingSpeak uplink using the channel update HTTP API.
//!
//! Each averaged window becomes one `GET` request:
//!
//! ```text
//! GET {base_url}?api_key=KEY&field1=22.5&field2=48.0&field3=812&field4=100
//! ```
//!
//! Temperature and humidity carry one decimal place. The endpoint treats a
//! literal zero as missing, so a zero light mean is sent as 1.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wellwork_adapters::thingspeak::ThingSpeakUplink;
//! use wellwork_core::hal::Uplink;
//! use wellwork_core::TelemetryPoint;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let uplink = ThingSpeakUplink::builder()
//!         .api_key("XXXXXXXXXXXXXXXX")
//!         .build()?;
//!     uplink.link().set(true);
//!
//!     let point = TelemetryPoint {
//!         temperature_c: 22.5,
//!         humidity_pct: 48.0,
//!         light: 812,
//!         score: 100,
//!         samples: 6,
//!     };
//!     uplink.upload(&point).await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};
use wellwork_core::hal::Uplink;
use wellwork_core::{TelemetryPoint, UploadError};

use crate::network::{parse_endpoint, LinkState};
use crate::AdapterError;

/// Public ThingSpeak update endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.thingspeak.com/update";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Channel field number for each telemetry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub temperature: u8,
    pub humidity: u8,
    pub light: u8,
    pub score: u8,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            temperature: 1,
            humidity: 2,
            light: 3,
            score: 4,
        }
    }
}

fn field(index: u8) -> String {
    format!("field{index}")
}

/// Uplink posting telemetry to a ThingSpeak channel.
#[derive(Debug, Clone)]
pub struct ThingSpeakUplink {
    client: Client,
    base_url: Url,
    api_key: String,
    fields: FieldMap,
    link: LinkState,
}

impl ThingSpeakUplink {
    /// Create a new builder for configuring the uplink.
    pub fn builder() -> ThingSpeakUplinkBuilder {
        ThingSpeakUplinkBuilder::default()
    }

    /// The link flag consulted by [`Uplink::is_connected`].
    pub fn link(&self) -> &LinkState {
        &self.link
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the update URL for one point.
    pub fn request_url(&self, point: &TelemetryPoint) -> Result<Url, UploadError> {
        if point.temperature_c.is_nan() || point.humidity_pct.is_nan() {
            return Err(UploadError::InvalidPayload("temperature or humidity is NaN"));
        }

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair(
                &field(self.fields.temperature),
                &format!("{:.1}", point.temperature_c),
            )
            .append_pair(
                &field(self.fields.humidity),
                &format!("{:.1}", point.humidity_pct),
            )
            .append_pair(
                &field(self.fields.light),
                &point.light_for_upload().to_string(),
            )
            .append_pair(&field(self.fields.score), &point.score.to_string());
        Ok(url)
    }

    async fn send(&self, url: Url) -> Result<(), UploadError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_connect() {
                    warn!("uplink endpoint unreachable, marking link down");
                    self.link.set(false);
                }
                return Err(AdapterError::from(e).into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
            });
        }

        // ThingSpeak answers with the new entry id, or 0 if the update was dropped.
        match response.text().await {
            Ok(body) => debug!(entry = body.trim(), "update accepted"),
            Err(e) => debug!(error = %e, "update accepted, body unreadable"),
        }
        Ok(())
    }
}

#[async_trait]
impl Uplink for ThingSpeakUplink {
    fn is_connected(&self) -> bool {
        self.link.is_up()
    }

    async fn upload(&self, point: &TelemetryPoint) -> Result<(), UploadError> {
        let url = self.request_url(point)?;
        debug!(endpoint = %self.base_url, samples = point.samples, "sending update");
        self.send(url).await
    }
}

/// Builder for ThingSpeakUplink.
#[derive(Debug, Default)]
pub struct ThingSpeakUplinkBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    fields: Option<FieldMap>,
    timeout: Option<Duration>,
    link: Option<LinkState>,
}

impl ThingSpeakUplinkBuilder {
    /// Set the update endpoint (default: the public ThingSpeak API).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the channel write API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the field numbers (default: 1 to 4).
    pub fn fields(mut self, fields: FieldMap) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Share an existing link flag instead of starting with a fresh one.
    pub fn link(mut self, link: LinkState) -> Self {
        self.link = Some(link);
        self
    }

    /// Build the uplink.
    pub fn build(self) -> Result<ThingSpeakUplink, AdapterError> {
        let raw = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_endpoint(&raw)?;

        let fields = self.fields.unwrap_or_default();
        let indices = [fields.temperature, fields.humidity, fields.light, fields.score];
        if indices.iter().any(|&i| !(1..=8).contains(&i)) {
            return Err(AdapterError::InvalidEndpoint(format!(
                "field numbers must be within 1..=8, got {indices:?}"
            )));
        }

        // Direct connection, like the network probe.
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .no_proxy()
            .build()?;

        Ok(ThingSpeakUplink {
            client,
            base_url,
            api_key: self.api_key.unwrap_or_default(),
            fields,
            link: self.link.unwrap_or_default(),
        })
    }
}
