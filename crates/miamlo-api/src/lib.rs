//! Typed HTTP client for the miamlo marketplace public API.

pub mod client;
pub mod error;
pub mod types;

pub use client::MiamloClient;
pub use error::ApiError;
pub use types::{
    ChefSummary, Paginated, PaginationInfo, PlatChef, PlatPromotion, PlatSummary,
};
