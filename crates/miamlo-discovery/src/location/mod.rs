//! User position acquisition, caching, and expiry.
//!
//! A [`LocationProvider`] owns the [`LocationStatus`] state machine shared by
//! all discovery surfaces. The actual position capability is injected through
//! [`PositionSource`] so tests run against a fake and production uses
//! [`ip_api::IpApiLocator`]. The acquired coordinate is persisted to a single
//! cache file (see [`store::LocationStore`]) with a 24-hour freshness window
//! enforced at read time.

pub mod ip_api;
pub mod store;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use store::LocationStore;

/// How long a persisted coordinate stays usable.
pub const LOCATION_TTL_HOURS: i64 = 24;

/// Default timeout for a single position acquisition.
pub const ACQUISITION_TIMEOUT: Duration = Duration::from_secs(15);

/// A geographic position with its capture time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub captured_at: DateTime<Utc>,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, captured_at: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            captured_at,
        }
    }

    /// Both components within valid WGS84 ranges.
    #[must_use]
    pub fn in_wgs84_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Captured less than [`LOCATION_TTL_HOURS`] before `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.captured_at) < chrono::Duration::hours(LOCATION_TTL_HOURS)
    }
}

/// Position state shared by every discovery surface.
///
/// `Granted` and `Denied` are terminal for a session, except that an explicit
/// retry moves `Denied` back through `Acquiring`.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationStatus {
    Idle,
    AwaitingPermission,
    Acquiring,
    Granted(Coordinate),
    Denied,
}

/// Errors from position acquisition or the cache file.
///
/// All acquisition failures collapse into the `Denied` UI state; these
/// variants exist for logging, never for display.
#[derive(Debug, Error)]
pub enum LocationError {
    /// No position capability is available on this host.
    #[error("no position capability available")]
    Unavailable,

    /// The capability answered but could not produce a position.
    #[error("position acquisition failed: {0}")]
    Acquisition(String),

    /// Network or TLS failure while querying the geolocation service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Cache file could not be written.
    #[error("location cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Injected position capability.
///
/// Production uses [`ip_api::IpApiLocator`]; tests substitute a fake for
/// deterministic transitions.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Returns `(latitude, longitude)` for the current user.
    async fn current_position(&self) -> Result<(f64, f64), LocationError>;
}

/// Owns acquisition, caching, and expiry of the user position.
pub struct LocationProvider<S> {
    store: LocationStore,
    source: S,
    timeout: Duration,
    status: LocationStatus,
}

impl<S: PositionSource> LocationProvider<S> {
    #[must_use]
    pub fn new(store: LocationStore, source: S, timeout: Duration) -> Self {
        Self {
            store,
            source,
            timeout,
            status: LocationStatus::Idle,
        }
    }

    /// Restores the persisted coordinate, if still fresh.
    ///
    /// Returns `Granted` when a valid cached coordinate exists, `Idle`
    /// otherwise. Expiry is enforced here, at read time; nothing runs in the
    /// background.
    pub fn restore(&mut self) -> LocationStatus {
        self.status = match self.store.load(Utc::now()) {
            Some(coordinate) => LocationStatus::Granted(coordinate),
            None => LocationStatus::Idle,
        };
        self.status.clone()
    }

    /// Marks the prompt as shown: `Idle` → `AwaitingPermission`.
    ///
    /// No-op in any other state.
    pub fn await_permission(&mut self) {
        if self.status == LocationStatus::Idle {
            self.status = LocationStatus::AwaitingPermission;
        }
    }

    /// Queries the position source and persists the result.
    ///
    /// Transitions through `Acquiring`, then to `Granted` on success or
    /// `Denied` on any failure — unavailable capability, source error, or
    /// timeout all coalesce. The cause is logged, never surfaced. Callable
    /// again from `Denied` (the retry affordance).
    pub async fn request_permission(&mut self) -> LocationStatus {
        self.status = LocationStatus::Acquiring;

        let acquired = tokio::time::timeout(self.timeout, self.source.current_position()).await;

        self.status = match acquired {
            Ok(Ok((latitude, longitude))) => {
                let coordinate = Coordinate::new(latitude, longitude, Utc::now());
                if coordinate.in_wgs84_range() {
                    if let Err(err) = self.store.save(&coordinate) {
                        tracing::warn!(error = %err, "could not persist location");
                    }
                    LocationStatus::Granted(coordinate)
                } else {
                    tracing::warn!(latitude, longitude, "position outside WGS84 ranges");
                    LocationStatus::Denied
                }
            }
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "position acquisition failed");
                LocationStatus::Denied
            }
            Err(_) => {
                tracing::debug!(timeout_secs = self.timeout.as_secs(), "position acquisition timed out");
                LocationStatus::Denied
            }
        };

        self.status.clone()
    }

    /// The user declined without invoking the source.
    pub fn dismiss(&mut self) {
        self.status = LocationStatus::Denied;
    }

    #[must_use]
    pub fn status(&self) -> &LocationStatus {
        &self.status
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match &self.status {
            LocationStatus::Granted(coordinate) => Some(*coordinate),
            _ => None,
        }
    }
}
