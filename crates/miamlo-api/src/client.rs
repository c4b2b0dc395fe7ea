//! HTTP client for the miamlo marketplace REST API.
//!
//! Wraps `reqwest` with marketplace-specific error handling and typed
//! response deserialization. All endpoints check the `"success"` field in the
//! JSON envelope and surface API-level rejections as [`ApiError::Rejected`].
//!
//! Page conventions differ between endpoints: `public/plats/search` and
//! `public/plats/promotions/paginated` take 1-based pages while
//! `public/chefs/nearby` takes 0-based pages. The client exposes 1-based
//! display pages everywhere and translates for the chefs endpoint at the
//! request boundary, so no other layer carries `±1` arithmetic.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ApiError;
use crate::types::{ApiEnvelope, ChefSummary, Paginated, PlatSummary};

/// Client for the miamlo public API.
///
/// Manages the HTTP client and base URL. Point `base_url` at a mock server
/// in tests.
pub struct MiamloClient {
    client: Client,
    base_url: Url,
}

impl MiamloClient {
    /// Creates a new client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining endpoint paths appends to it instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Searches dishes around a position.
    ///
    /// Calls `public/plats/search` (1-based pages). `filters` carries the
    /// already-built query parameters — page, page size, free text, category,
    /// sort, numeric filters — on top of the location triple added here.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`] if the envelope reports failure.
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_plats(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        filters: &[(String, String)],
    ) -> Result<Paginated<PlatSummary>, ApiError> {
        let mut params = location_params(latitude, longitude, radius_km);
        for (k, v) in filters {
            params.push((k.clone(), v.clone()));
        }

        let url = self.build_url("public/plats/search", &params)?;
        self.fetch_envelope(url, "public/plats/search").await
    }

    /// Lists chefs around a position, one page at a time.
    ///
    /// Calls `public/chefs/nearby`. `display_page` is 1-based like everywhere
    /// else in the client; this endpoint's requests are 0-based, so the
    /// translation happens here and nowhere else. The endpoint takes no text
    /// or filter parameters.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`MiamloClient::search_plats`].
    pub async fn nearby_chefs(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        display_page: u32,
        page_size: u32,
    ) -> Result<Paginated<ChefSummary>, ApiError> {
        let request_page = display_page.saturating_sub(1);

        let mut params = location_params(latitude, longitude, radius_km);
        params.push(("page".to_owned(), request_page.to_string()));
        params.push(("pageSize".to_owned(), page_size.to_string()));

        let url = self.build_url("public/chefs/nearby", &params)?;
        self.fetch_envelope(url, "public/chefs/nearby").await
    }

    /// Lists dishes with an active promotion around a position.
    ///
    /// Calls `public/plats/promotions/paginated` (1-based pages). Like the
    /// chefs endpoint it accepts no text or filter parameters.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`MiamloClient::search_plats`].
    pub async fn promotions_page(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        page: u32,
        page_size: u32,
    ) -> Result<Paginated<PlatSummary>, ApiError> {
        let mut params = location_params(latitude, longitude, radius_km);
        params.push(("page".to_owned(), page.to_string()));
        params.push(("pageSize".to_owned(), page_size.to_string()));

        let url = self.build_url("public/plats/promotions/paginated", &params)?;
        self.fetch_envelope(url, "public/plats/promotions/paginated")
            .await
    }

    /// Fetches the distinct dish categories available around a position,
    /// used to render filter chips.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`MiamloClient::search_plats`].
    pub async fn categories(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
    ) -> Result<Vec<String>, ApiError> {
        let params = location_params(latitude, longitude, radius_km);
        let url = self.build_url("public/plats/categories", &params)?;
        self.fetch_envelope(url, "public/plats/categories").await
    }

    /// GETs `url`, checks the envelope, and deserializes `data` into `T`.
    async fn fetch_envelope<T>(&self, url: Url, context: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = self.request_json(&url).await?;
        Self::check_envelope(&body)?;

        let envelope: ApiEnvelope<T> =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        Ok(envelope.data)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters appended via [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, params: &[(String, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path).map_err(|e| ApiError::InvalidBaseUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on network failure or a non-2xx status.
    /// Returns [`ApiError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(%url, "issuing API request");
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"success"` field and returns an error if it
    /// indicates failure.
    fn check_envelope(body: &serde_json::Value) -> Result<(), ApiError> {
        if body.get("success").and_then(serde_json::Value::as_bool) != Some(true) {
            let msg = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ApiError::Rejected(msg));
        }
        Ok(())
    }
}

/// The location triple sent with every discovery request.
fn location_params(latitude: f64, longitude: f64, radius_km: u32) -> Vec<(String, String)> {
    vec![
        ("latitude".to_owned(), latitude.to_string()),
        ("longitude".to_owned(), longitude.to_string()),
        ("radiusKm".to_owned(), radius_km.to_string()),
    ]
}
