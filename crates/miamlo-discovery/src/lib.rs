//! Location-aware, filtered, paginated discovery for the miamlo marketplace.
//!
//! One generic [`DiscoveryEngine`] drives the three discovery surfaces
//! (dishes, chefs, promotions) through per-surface [`Catalog`] bindings,
//! coordinating position acquisition, debounced search, server-side
//! pagination, and last-write-wins fetch ordering.

pub mod catalog;
pub mod engine;
pub mod location;
pub mod pager;
pub mod query;

pub use catalog::{Catalog, ChefCatalog, PlatCatalog, PromoCatalog};
pub use engine::{DiscoveryEngine, Phase, ResultPage, GENERIC_FETCH_ERROR};
pub use location::ip_api::IpApiLocator;
pub use location::store::LocationStore;
pub use location::{Coordinate, LocationError, LocationProvider, LocationStatus, PositionSource};
pub use pager::{page_strip, showing_range, PageEntry};
pub use query::{SearchQuery, SortKey};
