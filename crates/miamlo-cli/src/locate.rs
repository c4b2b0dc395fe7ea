//! The `locate` command: acquire the position and cache it for 24 hours.

use std::time::Duration;

use miamlo_core::AppConfig;
use miamlo_discovery::{IpApiLocator, LocationProvider, LocationStatus, LocationStore};

use crate::render;

fn provider(config: &AppConfig) -> anyhow::Result<LocationProvider<IpApiLocator>> {
    let store = LocationStore::from_override(config.location_cache_path.clone());
    let locator = IpApiLocator::new(
        &config.geolocator_url,
        config.location_timeout_secs,
        &config.user_agent,
    )?;
    Ok(LocationProvider::new(
        store,
        locator,
        Duration::from_secs(config.location_timeout_secs),
    ))
}

pub async fn run(config: &AppConfig, force: bool) -> anyhow::Result<()> {
    let mut provider = provider(config)?;

    if !force {
        if let LocationStatus::Granted(coordinate) = provider.restore() {
            println!(
                "Using cached position {:.4}, {:.4} (captured {}).",
                coordinate.latitude, coordinate.longitude, coordinate.captured_at
            );
            println!("Pass --force to acquire a fresh one.");
            return Ok(());
        }
    }

    println!("Acquiring position...");
    match provider.request_permission().await {
        LocationStatus::Granted(coordinate) => {
            println!(
                "Position granted: {:.4}, {:.4}",
                coordinate.latitude, coordinate.longitude
            );
            println!("Cached for 24 hours; discovery commands will use it.");
        }
        _ => println!("{}", render::location_denied()),
    }
    Ok(())
}
