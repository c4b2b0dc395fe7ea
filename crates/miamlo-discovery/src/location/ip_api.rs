//! IP-geolocation backed [`PositionSource`].
//!
//! Headless stand-in for a device position capability: asks an ip-api.com
//! compatible endpoint (`{"status": "success", "lat": .., "lon": ..}`) where
//! the current connection appears to be. Coarse, but enough to anchor a
//! 30 km discovery radius.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{LocationError, PositionSource};

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Position source backed by an ip-api.com compatible JSON endpoint.
pub struct IpApiLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiLocator {
    /// Creates a locator for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, LocationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }
}

#[async_trait]
impl PositionSource for IpApiLocator {
    async fn current_position(&self) -> Result<(f64, f64), LocationError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let response = response.error_for_status()?;
        let body: IpApiResponse = response.json().await?;

        if body.status != "success" {
            let reason = body
                .message
                .unwrap_or_else(|| "geolocation lookup failed".to_owned());
            return Err(LocationError::Acquisition(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(LocationError::Acquisition(
                "geolocation response missing coordinates".to_owned(),
            )),
        }
    }
}
