//! The discovery state machine.
//!
//! One [`DiscoveryEngine`] per surface binds a [`Catalog`] to the user's
//! position and filter state. Phases move `NotReady → Loading →
//! Ready | Failed`; every filter change re-enters `Loading` and re-fetches.
//! Free-text edits are debounced; every other filter change fetches
//! immediately. Overlapping fetches resolve last-write-wins: each issued
//! fetch carries a generation number and commits only if no newer fetch has
//! been issued since.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use miamlo_api::{Paginated, PaginationInfo};

use crate::catalog::Catalog;
use crate::location::Coordinate;
use crate::query::{SearchQuery, SortKey};

/// Debounce window for free-text search.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Message carried by [`Phase::Failed`]. The underlying cause is logged,
/// never shown.
pub const GENERIC_FETCH_ERROR: &str = "results could not be loaded";

/// One page of discovery results as the renderer sees it.
#[derive(Debug, Clone)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    /// The server's pagination envelope. When `locally_filtered` is true the
    /// totals describe the unfiltered server count, which can exceed the
    /// visible items.
    pub pagination: PaginationInfo,
    /// True when free text was applied locally over the fetched page
    /// (surfaces whose endpoint takes no text parameter).
    pub locally_filtered: bool,
}

/// Engine phase for one discovery surface.
#[derive(Debug, Clone)]
pub enum Phase<T> {
    /// No position yet; nothing to fetch.
    NotReady,
    Loading,
    Ready(ResultPage<T>),
    Failed(String),
}

struct EngineState<T> {
    query: SearchQuery,
    position: Option<Coordinate>,
    phase: Phase<T>,
    /// Generation of the most recently issued fetch.
    issued: u64,
}

/// Stateful orchestrator binding position + query to a [`Catalog`].
pub struct DiscoveryEngine<C: Catalog> {
    catalog: Arc<C>,
    state: Arc<Mutex<EngineState<C::Item>>>,
    debounce: Duration,
    pending_search: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl<C: Catalog> DiscoveryEngine<C> {
    #[must_use]
    pub fn new(catalog: C, query: SearchQuery) -> Self {
        Self::with_debounce(catalog, query, SEARCH_DEBOUNCE)
    }

    /// Like [`DiscoveryEngine::new`] with an explicit debounce window
    /// (configuration and tests).
    #[must_use]
    pub fn with_debounce(catalog: C, query: SearchQuery, debounce: Duration) -> Self {
        Self {
            catalog: Arc::new(catalog),
            state: Arc::new(Mutex::new(EngineState {
                query,
                position: None,
                phase: Phase::NotReady,
                issued: 0,
            })),
            debounce,
            pending_search: std::sync::Mutex::new(None),
        }
    }

    /// Supplies the user position and issues the first fetch.
    pub async fn attach_position(&self, position: Coordinate) {
        {
            let mut state = self.state.lock().await;
            state.position = Some(position);
        }
        refresh(Arc::clone(&self.catalog), Arc::clone(&self.state)).await;
    }

    /// The current phase, cloned for rendering.
    pub async fn phase(&self) -> Phase<C::Item> {
        self.state.lock().await.phase.clone()
    }

    /// The current filter state, cloned.
    pub async fn query(&self) -> SearchQuery {
        self.state.lock().await.query.clone()
    }

    /// True when any filter besides sort order is set.
    pub async fn has_active_filters(&self) -> bool {
        self.state.lock().await.query.has_active_filters()
    }

    /// Updates the free text. The text lands immediately; the page reset and
    /// refetch run after the debounce window, and every new edit aborts the
    /// previous pending one — a burst of edits yields exactly one fetch,
    /// carrying the last value.
    pub async fn set_free_text(&self, text: impl Into<String> + Send) {
        {
            let mut state = self.state.lock().await;
            state.query.free_text = text.into();
        }

        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            {
                let mut state = state.lock().await;
                state.query.page = 1;
            }
            refresh(catalog, state).await;
        });
        self.replace_pending(Some(handle));
    }

    /// Selects or clears the category chip. Immediate refetch from page 1.
    pub async fn set_category(&self, category: Option<String>) {
        self.apply(move |query| query.category = category).await;
    }

    /// Changes the sort order. Immediate refetch from page 1.
    pub async fn set_sort(&self, sort: SortKey) {
        self.apply(move |query| query.sort = sort).await;
    }

    /// Sets or clears the maximum cook time filter. Immediate refetch from
    /// page 1.
    pub async fn set_max_cook_time(&self, minutes: Option<u32>) {
        self.apply(move |query| query.max_cook_time = minutes).await;
    }

    /// Sets or clears the minimum rating filter. Immediate refetch from
    /// page 1.
    pub async fn set_min_rating(&self, rating: Option<f32>) {
        self.apply(move |query| query.min_rating = rating).await;
    }

    /// Clears every filter and refetches the first page — the reset
    /// affordance of the filtered empty state.
    pub async fn reset_filters(&self) {
        {
            let mut state = self.state.lock().await;
            state.query.reset_filters();
        }
        refresh(Arc::clone(&self.catalog), Arc::clone(&self.state)).await;
    }

    /// Navigates to `page`, keeping all filters.
    ///
    /// Bounds-checked against the last known page count: out-of-range pages
    /// and same-page no-ops return `false` without fetching. Only meaningful
    /// from `Ready`.
    pub async fn go_to_page(&self, page: u32) -> bool {
        {
            let mut state = self.state.lock().await;
            let total_pages = match &state.phase {
                Phase::Ready(result) => result.pagination.total_pages,
                _ => return false,
            };
            if page == 0 || page > total_pages || page == state.query.page {
                return false;
            }
            state.query.page = page;
        }
        refresh(Arc::clone(&self.catalog), Arc::clone(&self.state)).await;
        true
    }

    /// Re-issues the last request unchanged — the recovery action after
    /// `Failed`.
    pub async fn retry(&self) {
        refresh(Arc::clone(&self.catalog), Arc::clone(&self.state)).await;
    }

    /// Immediate filter mutation: update, reset page, refetch.
    async fn apply<F>(&self, mutate: F)
    where
        F: FnOnce(&mut SearchQuery) + Send,
    {
        {
            let mut state = self.state.lock().await;
            mutate(&mut state.query);
            state.query.page = 1;
        }
        refresh(Arc::clone(&self.catalog), Arc::clone(&self.state)).await;
    }

    /// Swaps the pending debounce task, aborting the previous one.
    fn replace_pending(&self, handle: Option<JoinHandle<()>>) {
        if let Ok(mut pending) = self.pending_search.lock() {
            if let Some(previous) = pending.take() {
                previous.abort();
            }
            *pending = handle;
        }
    }
}

impl<C: Catalog> Drop for DiscoveryEngine<C> {
    fn drop(&mut self) {
        self.replace_pending(None);
    }
}

/// Issues one fetch for the current query and commits the result unless a
/// newer fetch has been issued meanwhile.
async fn refresh<C: Catalog>(catalog: Arc<C>, state: Arc<Mutex<EngineState<C::Item>>>) {
    let (generation, position, query) = {
        let mut state = state.lock().await;
        let Some(position) = state.position else {
            // Still NotReady; filters can change freely before a position
            // arrives without triggering traffic.
            return;
        };
        state.issued += 1;
        state.phase = Phase::Loading;
        (state.issued, position, state.query.clone())
    };

    let result = catalog.fetch_page(&position, &query).await;

    let mut state = state.lock().await;
    if state.issued != generation {
        tracing::debug!(
            generation,
            current = state.issued,
            "discarding stale discovery response"
        );
        return;
    }
    state.phase = match result {
        Ok(page) => Phase::Ready(apply_local_search(catalog.as_ref(), page, &query)),
        Err(err) => {
            tracing::warn!(error = %err, "discovery fetch failed");
            Phase::Failed(GENERIC_FETCH_ERROR.to_owned())
        }
    };
}

/// Applies the catalog's local match predicate over a fetched page when the
/// surface searches locally and text is set. The pagination envelope is kept
/// as the server reported it.
fn apply_local_search<C: Catalog>(
    catalog: &C,
    page: Paginated<C::Item>,
    query: &SearchQuery,
) -> ResultPage<C::Item> {
    if let Some(text) = query.trimmed_text() {
        if catalog.searches_locally() {
            let needle = text.to_lowercase();
            let items = page
                .items
                .into_iter()
                .filter(|item| catalog.matches(item, &needle))
                .collect();
            return ResultPage {
                items,
                pagination: page.pagination,
                locally_filtered: true,
            };
        }
    }
    ResultPage {
        items: page.items,
        pagination: page.pagination,
        locally_filtered: false,
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
