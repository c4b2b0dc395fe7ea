//! miamlo public API response types.
//!
//! All types model the JSON structures returned by the marketplace backend.
//! The API wraps every response in a `{"success": true, "data": ...}`
//! envelope; [`ApiEnvelope`] captures that pattern generically. Field names
//! are camelCase on the wire.

use serde::Deserialize;

/// Top-level envelope for all backend responses.
///
/// `success` is `true` on success; on failure `message` usually carries a
/// human-readable cause and `data` is absent.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// One page of results plus its pagination envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// Pagination metadata returned alongside every page.
///
/// `currentPage` is 1-based for every endpoint's *response*, including
/// `public/chefs/nearby` whose *request* pages are 0-based.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

// ---------------------------------------------------------------------------
// public/plats/search, public/plats/promotions/paginated
// ---------------------------------------------------------------------------

/// A dish as returned by the search and promotions endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Estimated preparation time in minutes.
    pub estimated_cook_time: u32,
    pub price: f64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub promotion: Option<PlatPromotion>,
    pub chef: PlatChef,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub is_chef_open: bool,
}

impl PlatSummary {
    /// Price after the active promotion, or `None` when no reduction applies.
    #[must_use]
    pub fn discounted_price(&self) -> Option<f64> {
        let promo = self.promotion.as_ref()?;
        if promo.is_active && promo.reduction_value > 0.0 {
            Some(self.price * (1.0 - promo.reduction_value / 100.0))
        } else {
            None
        }
    }

    /// Absolute saving for the active promotion, or `None` without one.
    #[must_use]
    pub fn savings(&self) -> Option<f64> {
        self.discounted_price().map(|d| self.price - d)
    }
}

/// An active or scheduled promotion attached to a dish.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatPromotion {
    pub id: String,
    /// Percentage knocked off the listed price.
    pub reduction_value: f64,
    /// End of validity, ISO-8601.
    #[serde(default)]
    pub reduction_ends: Option<String>,
    pub is_active: bool,
}

/// The chef reference embedded in a [`PlatSummary`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatChef {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub chef_cover_img: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
}

impl PlatChef {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// public/chefs/nearby
// ---------------------------------------------------------------------------

/// A chef profile as returned by the nearby endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub chef_cover_img: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub chef_certifications: Vec<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    /// Account creation time, ISO-8601.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl ChefSummary {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
