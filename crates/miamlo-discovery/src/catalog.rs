//! Endpoint bindings for the discovery engine.
//!
//! Each discovery surface is a [`Catalog`]: one remote fetch plus the
//! surface's text-search behavior. The dishes endpoint searches server-side;
//! the chefs and promotions endpoints accept no text parameter, so their
//! catalogs declare local search and supply the match predicate the engine
//! applies over each fetched page.

use std::sync::Arc;

use async_trait::async_trait;

use miamlo_api::{ApiError, ChefSummary, MiamloClient, Paginated, PlatSummary};

use crate::location::Coordinate;
use crate::query::SearchQuery;

/// One discovery surface: a remote page fetch and its search behavior.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Fetches one page of results around `position`.
    async fn fetch_page(
        &self,
        position: &Coordinate,
        query: &SearchQuery,
    ) -> Result<Paginated<Self::Item>, ApiError>;

    /// Whether the backend ignores free text for this surface, leaving the
    /// engine to filter the returned page locally.
    fn searches_locally(&self) -> bool {
        false
    }

    /// Local match predicate, consulted only when [`Catalog::searches_locally`]
    /// is true. `needle` is trimmed and lowercased.
    fn matches(&self, _item: &Self::Item, _needle: &str) -> bool {
        true
    }
}

/// Dishes: `public/plats/search`, full server-side filtering.
pub struct PlatCatalog {
    client: Arc<MiamloClient>,
    radius_km: u32,
}

impl PlatCatalog {
    #[must_use]
    pub fn new(client: Arc<MiamloClient>, radius_km: u32) -> Self {
        Self { client, radius_km }
    }
}

#[async_trait]
impl Catalog for PlatCatalog {
    type Item = PlatSummary;

    async fn fetch_page(
        &self,
        position: &Coordinate,
        query: &SearchQuery,
    ) -> Result<Paginated<PlatSummary>, ApiError> {
        self.client
            .search_plats(
                position.latitude,
                position.longitude,
                self.radius_km,
                &query.params(),
            )
            .await
    }
}

/// Chefs: `public/chefs/nearby`, free text applied locally over each page.
pub struct ChefCatalog {
    client: Arc<MiamloClient>,
    radius_km: u32,
}

impl ChefCatalog {
    #[must_use]
    pub fn new(client: Arc<MiamloClient>, radius_km: u32) -> Self {
        Self { client, radius_km }
    }
}

#[async_trait]
impl Catalog for ChefCatalog {
    type Item = ChefSummary;

    async fn fetch_page(
        &self,
        position: &Coordinate,
        query: &SearchQuery,
    ) -> Result<Paginated<ChefSummary>, ApiError> {
        self.client
            .nearby_chefs(
                position.latitude,
                position.longitude,
                self.radius_km,
                query.page,
                query.page_size,
            )
            .await
    }

    fn searches_locally(&self) -> bool {
        true
    }

    fn matches(&self, chef: &ChefSummary, needle: &str) -> bool {
        chef.full_name().to_lowercase().contains(needle)
            || chef
                .categories
                .iter()
                .any(|category| category.to_lowercase().contains(needle))
            || chef
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

/// Promotions: `public/plats/promotions/paginated`, free text applied locally.
pub struct PromoCatalog {
    client: Arc<MiamloClient>,
    radius_km: u32,
}

impl PromoCatalog {
    #[must_use]
    pub fn new(client: Arc<MiamloClient>, radius_km: u32) -> Self {
        Self { client, radius_km }
    }
}

#[async_trait]
impl Catalog for PromoCatalog {
    type Item = PlatSummary;

    async fn fetch_page(
        &self,
        position: &Coordinate,
        query: &SearchQuery,
    ) -> Result<Paginated<PlatSummary>, ApiError> {
        self.client
            .promotions_page(
                position.latitude,
                position.longitude,
                self.radius_km,
                query.page,
                query.page_size,
            )
            .await
    }

    fn searches_locally(&self) -> bool {
        true
    }

    fn matches(&self, plat: &PlatSummary, needle: &str) -> bool {
        plat.name.to_lowercase().contains(needle)
            || plat.chef.first_name.to_lowercase().contains(needle)
            || plat.chef.last_name.to_lowercase().contains(needle)
            || plat
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}
