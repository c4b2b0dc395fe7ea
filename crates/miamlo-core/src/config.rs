use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("MIAMLO_API_BASE_URL")?;

    let radius_km = parse_u32("MIAMLO_RADIUS_KM", "30")?;
    let page_size = parse_u32("MIAMLO_PAGE_SIZE", "12")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MIAMLO_PAGE_SIZE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("MIAMLO_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MIAMLO_USER_AGENT", "miamlo/0.1 (marketplace-discovery)");

    let geolocator_url = or_default("MIAMLO_GEOLOCATOR_URL", "http://ip-api.com/json");
    let location_timeout_secs = parse_u64("MIAMLO_LOCATION_TIMEOUT_SECS", "15")?;
    let search_debounce_ms = parse_u64("MIAMLO_SEARCH_DEBOUNCE_MS", "400")?;
    let location_cache_path = lookup("MIAMLO_LOCATION_CACHE_PATH").ok().map(PathBuf::from);
    let log_level = or_default("MIAMLO_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_base_url,
        radius_km,
        page_size,
        request_timeout_secs,
        user_agent,
        geolocator_url,
        location_timeout_secs,
        search_debounce_ms,
        location_cache_path,
        log_level,
    })
}
