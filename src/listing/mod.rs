use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::backend::{ListingPage, PageRequest, PropertyBackend};
use crate::filters::FilterState;
use crate::models::PropertySummary;

/// Lifecycle of the feed for the current filter
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Idle,
    /// First page for this filter is being fetched
    Loading,
    /// A follow-up page is being fetched
    LoadingMore,
    Loaded,
    /// No further pages exist for this filter
    Exhausted,
    /// The last fetch failed; retrying re-requests the same page
    Error(String),
}

/// Identifies one fetch against the filter it was issued for. A filter
/// change bumps the feed's generation, so a token minted before the change
/// no longer matches and its result is discarded instead of merged.
#[derive(Debug, Clone, Copy)]
struct PageToken {
    generation: u64,
    page: u32,
}

/// Incrementally loads listing pages for the active filter, accumulating
/// summaries and dropping duplicates by id.
///
/// At most one fetch is in flight at a time; extra triggers from rapid
/// scrolling are suppressed rather than queued.
pub struct ListingFeed<B: PropertyBackend> {
    backend: Arc<B>,
    per_page: u32,
    filter: FilterState,
    items: Vec<PropertySummary>,
    seen: HashSet<String>,
    state: FeedState,
    next_page: u32,
    total_count: Option<u64>,
    in_flight: bool,
    generation: u64,
}

impl<B: PropertyBackend> ListingFeed<B> {
    pub fn new(backend: Arc<B>, per_page: u32) -> Self {
        Self {
            backend,
            per_page,
            filter: FilterState::default(),
            items: Vec::new(),
            seen: HashSet::new(),
            state: FeedState::Idle,
            next_page: 1,
            total_count: None,
            in_flight: false,
            generation: 0,
        }
    }

    pub fn items(&self) -> &[PropertySummary] {
        &self.items
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        !matches!(self.state, FeedState::Exhausted)
    }

    /// Switch to a new filter. Accumulated items are discarded and
    /// pagination restarts at page 1; an unchanged filter is a no-op.
    pub fn set_filter(&mut self, filter: FilterState) {
        if filter == self.filter {
            return;
        }
        debug!("Filter changed, resetting listing feed");
        self.filter = filter;
        self.generation += 1;
        self.items.clear();
        self.seen.clear();
        self.state = FeedState::Idle;
        self.next_page = 1;
        self.total_count = None;
    }

    /// Fetch the next page (or retry the failed one). No-ops while a fetch
    /// is already in flight or once the feed is exhausted.
    pub async fn load_more(&mut self) {
        let Some(token) = self.begin_fetch() else {
            return;
        };

        let filter = self.filter.clone();
        let request = PageRequest {
            page: token.page,
            per_page: self.per_page,
        };
        let result = self.backend.list_properties(&filter, request).await;

        self.apply_result(token, result);
    }

    fn begin_fetch(&mut self) -> Option<PageToken> {
        if self.in_flight {
            debug!("Listing fetch already in flight, ignoring trigger");
            return None;
        }
        if self.state == FeedState::Exhausted {
            return None;
        }

        self.state = if self.next_page == 1 {
            FeedState::Loading
        } else {
            FeedState::LoadingMore
        };
        self.in_flight = true;

        Some(PageToken {
            generation: self.generation,
            page: self.next_page,
        })
    }

    fn apply_result(&mut self, token: PageToken, result: Result<ListingPage>) {
        self.in_flight = false;

        if token.generation != self.generation {
            debug!("Discarding stale page {} for a superseded filter", token.page);
            return;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to load listing page {}: {:#}", token.page, e);
                self.state = FeedState::Error(e.to_string());
                return;
            }
        };

        let mut fresh = 0;
        for item in page.items {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item);
                fresh += 1;
            } else {
                debug!("Skipping duplicate listing {}", item.id);
            }
        }

        debug!("Merged page {}: {} new items", page.page, fresh);
        self.total_count = Some(page.total_count);

        // A page that contributes nothing new ends the feed even if the
        // backend still claims more; otherwise a repeating tail page would
        // loop forever.
        if !page.has_more || fresh == 0 {
            info!(
                "Listing exhausted for the current filter: {} items",
                self.items.len()
            );
            self.state = FeedState::Exhausted;
        } else {
            self.state = FeedState::Loaded;
            self.next_page += 1;
        }
    }
}
