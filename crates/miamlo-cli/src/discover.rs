//! The discovery commands: dishes, chefs, promotions, categories.
//!
//! Each command restores the cached position (prompting the user towards
//! `miamlo locate` when there is none), binds the matching catalog to a
//! one-shot engine run, and renders the resulting page.

use std::sync::Arc;
use std::time::Duration;

use miamlo_api::MiamloClient;
use miamlo_core::AppConfig;
use miamlo_discovery::{
    Catalog, ChefCatalog, Coordinate, DiscoveryEngine, LocationStore, Phase, PlatCatalog,
    PromoCatalog, SearchQuery, SortKey,
};

use crate::render;

/// Restores the persisted position without prompting.
fn restored_position(config: &AppConfig) -> Option<Coordinate> {
    let store = LocationStore::from_override(config.location_cache_path.clone());
    store.load_now()
}

fn client(config: &AppConfig) -> anyhow::Result<Arc<MiamloClient>> {
    Ok(Arc::new(MiamloClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?))
}

pub async fn run_plats(
    config: &AppConfig,
    search: Option<String>,
    category: Option<String>,
    sort: SortKey,
    max_cook_time: Option<u32>,
    min_rating: Option<f32>,
    page: u32,
) -> anyhow::Result<()> {
    let Some(coordinate) = restored_position(config) else {
        println!("{}", render::location_required());
        return Ok(());
    };

    let mut query = SearchQuery::new(config.page_size);
    query.free_text = search.unwrap_or_default();
    query.category = category;
    query.sort = sort;
    query.max_cook_time = max_cook_time;
    query.min_rating = min_rating;
    query.page = page.max(1);

    let catalog = PlatCatalog::new(client(config)?, config.radius_km);
    run_surface(config, catalog, query, coordinate, render::plat_page).await
}

pub async fn run_chefs(
    config: &AppConfig,
    search: Option<String>,
    page: u32,
) -> anyhow::Result<()> {
    let Some(coordinate) = restored_position(config) else {
        println!("{}", render::location_required());
        return Ok(());
    };

    let mut query = SearchQuery::new(config.page_size);
    query.free_text = search.unwrap_or_default();
    query.page = page.max(1);

    let catalog = ChefCatalog::new(client(config)?, config.radius_km);
    run_surface(config, catalog, query, coordinate, render::chef_page).await
}

pub async fn run_promos(
    config: &AppConfig,
    search: Option<String>,
    page: u32,
) -> anyhow::Result<()> {
    let Some(coordinate) = restored_position(config) else {
        println!("{}", render::location_required());
        return Ok(());
    };

    let mut query = SearchQuery::new(config.page_size);
    query.free_text = search.unwrap_or_default();
    query.page = page.max(1);

    let catalog = PromoCatalog::new(client(config)?, config.radius_km);
    run_surface(config, catalog, query, coordinate, render::promo_page).await
}

pub async fn run_categories(config: &AppConfig) -> anyhow::Result<()> {
    let Some(coordinate) = restored_position(config) else {
        println!("{}", render::location_required());
        return Ok(());
    };

    let client = client(config)?;
    match client
        .categories(coordinate.latitude, coordinate.longitude, config.radius_km)
        .await
    {
        Ok(categories) if categories.is_empty() => {
            println!("No categories available around you yet.");
        }
        Ok(categories) => {
            println!("Categories available nearby:");
            for category in categories {
                println!("  {category}");
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "categories fetch failed");
            println!("{}", render::fetch_failed());
        }
    }
    Ok(())
}

/// Shared one-shot engine run: attach the position, fetch, render.
async fn run_surface<C, R>(
    config: &AppConfig,
    catalog: C,
    query: SearchQuery,
    coordinate: Coordinate,
    render_page: R,
) -> anyhow::Result<()>
where
    C: Catalog,
    R: Fn(&miamlo_discovery::ResultPage<C::Item>) -> String,
{
    let engine = DiscoveryEngine::with_debounce(
        catalog,
        query,
        Duration::from_millis(config.search_debounce_ms),
    );
    engine.attach_position(coordinate).await;

    let filtered = engine.has_active_filters().await;
    match engine.phase().await {
        Phase::Ready(result) if result.items.is_empty() => {
            println!("{}", render::empty_state(filtered));
        }
        Phase::Ready(result) => {
            println!("{}", render_page(&result));
        }
        Phase::Failed(_) | Phase::NotReady | Phase::Loading => {
            println!("{}", render::fetch_failed());
        }
    }
    Ok(())
}
