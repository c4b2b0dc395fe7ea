//! Persisted location cache.
//!
//! One JSON file, `{"lat": .., "lng": .., "ts": ..}` with `ts` in epoch
//! milliseconds, shared by every discovery surface: granting location once
//! satisfies all of them for 24 hours. Freshness is enforced when the file is
//! read, never by a background task, and anything unreadable — missing file,
//! corrupt JSON, out-of-range values, expired capture time — reads as absent.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinate, LocationError};

/// On-disk shape of the cached position.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLocation {
    lat: f64,
    lng: f64,
    /// Capture time, epoch milliseconds.
    ts: i64,
}

/// Reads and writes the shared location cache file.
pub struct LocationStore {
    path: PathBuf,
}

impl LocationStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The platform-appropriate default cache file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("miamlo")
            .join("location.json")
    }

    /// Store at `override_path` when configured, at the default otherwise.
    #[must_use]
    pub fn from_override(override_path: Option<PathBuf>) -> Self {
        Self::new(override_path.unwrap_or_else(Self::default_path))
    }

    /// Loads the cached coordinate, applying expiry and range validation.
    ///
    /// Returns `None` for a missing or unusable cache; this is never an
    /// error, the caller just prompts again.
    #[must_use]
    pub fn load(&self, now: DateTime<Utc>) -> Option<Coordinate> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let stored: StoredLocation = serde_json::from_str(&raw).ok()?;
        let captured_at = Utc.timestamp_millis_opt(stored.ts).single()?;

        let coordinate = Coordinate::new(stored.lat, stored.lng, captured_at);
        if !coordinate.in_wgs84_range() {
            tracing::debug!("discarding cached location outside WGS84 ranges");
            return None;
        }
        if !coordinate.is_fresh(now) {
            tracing::debug!("discarding expired cached location");
            return None;
        }
        Some(coordinate)
    }

    /// [`LocationStore::load`] against the current wall clock.
    #[must_use]
    pub fn load_now(&self) -> Option<Coordinate> {
        self.load(Utc::now())
    }

    /// Persists `coordinate`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Io`] if the directory or file cannot be
    /// written.
    pub fn save(&self, coordinate: &Coordinate) -> Result<(), LocationError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredLocation {
            lat: coordinate.latitude,
            lng: coordinate.longitude,
            ts: coordinate.captured_at.timestamp_millis(),
        };
        let body = serde_json::to_string(&stored).map_err(|e| {
            LocationError::Acquisition(format!("could not encode location: {e}"))
        })?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}
