use std::path::PathBuf;

/// Runtime configuration for the discovery client.
///
/// Every field maps to a `MIAMLO_*` environment variable; see
/// [`crate::config::load_app_config`] for defaults and parsing.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the marketplace backend, e.g. `https://api.example.com/api/v1`.
    pub api_base_url: String,
    /// Search radius sent with every discovery request, in kilometres.
    pub radius_km: u32,
    /// Page size for all paginated discovery endpoints.
    pub page_size: u32,
    /// Per-request timeout for backend calls, in seconds.
    pub request_timeout_secs: u64,
    /// `User-Agent` header sent with every backend request.
    pub user_agent: String,
    /// Base URL of the IP-geolocation service used to acquire a position.
    pub geolocator_url: String,
    /// Timeout for a single position acquisition, in seconds.
    pub location_timeout_secs: u64,
    /// Debounce window for free-text search, in milliseconds.
    pub search_debounce_ms: u64,
    /// Override for the persisted-location cache file. When `None`, the
    /// platform cache directory is used.
    pub location_cache_path: Option<PathBuf>,
    pub log_level: String,
}
