//! Page queries for the polls list.
//!
//! [`PollsQuery`] is provided once at the app root and owns the API client
//! plus the shared [`PageCache`]. Components read pages through
//! [`use_polls_page`], which fetches the requested page, keeps the last
//! settled page around as a placeholder and prefetches the next page.

use chrono::Utc;
use client::{FetchTicket, PageCache, PageKey, PageView, PollsClient};
use dioxus::prelude::*;
use shared_types::{PageIndex, Poll, PAGE_SIZE};
use tracing::{debug, warn};

/// Cache resource name for the polls list.
pub const POLLS_RESOURCE: &str = "polls";

pub fn polls_key(page: PageIndex) -> PageKey {
    PageKey::new(POLLS_RESOURCE, page)
}

/// Shared polls data access, provided via context.
#[derive(Clone)]
pub struct PollsQuery {
    pub client: PollsClient,
    pub cache: Signal<PageCache<Poll>>,
}

impl PollsQuery {
    /// Fetch `page` unless it is fresh in the cache or already in flight.
    pub fn ensure(&self, page: PageIndex) {
        let mut cache = self.cache;
        let ticket = cache.write().begin_fetch(polls_key(page), Utc::now());
        if let Some(ticket) = ticket {
            self.run(ticket);
        }
    }

    /// Background fetch of a page the user is likely to open next.
    pub fn prefetch(&self, page: PageIndex) {
        debug!(page = %page, "prefetching polls page");
        self.ensure(page);
    }

    /// Refetch `page` even if the cache considers it fresh.
    pub fn retry(&self, page: PageIndex) {
        let mut cache = self.cache;
        let ticket = cache.write().force_fetch(polls_key(page));
        if let Some(ticket) = ticket {
            self.run(ticket);
        }
    }

    /// Mark every cached polls page stale and reload `page`.
    pub fn refresh(&self, page: PageIndex) {
        let mut cache = self.cache;
        cache.write().invalidate_resource(POLLS_RESOURCE);
        self.ensure(page);
    }

    fn run(&self, ticket: FetchTicket) {
        let client = self.client.clone();
        let mut cache = self.cache;
        // Not tied to the calling component: a request that outlives its
        // page must still settle its cache entry.
        spawn_forever(async move {
            let page = ticket.key.page;
            let result = client.list_polls_page(page).await.map(|p| p.data);
            if let Err(err) = &result {
                warn!(page = %page, error = %err, "failed to load polls page");
            }
            cache.write().complete(ticket, result, Utc::now());
        });
    }
}

/// Reactive state of the polls page currently shown.
#[derive(Clone, Copy, PartialEq)]
pub struct PollsPageState {
    pub view: Memo<PageView<Poll>>,
    pub has_next: Memo<bool>,
}

/// Load `page` of the polls list and keep the next page warm.
pub fn use_polls_page(page: PageIndex) -> PollsPageState {
    let query = use_context::<PollsQuery>();
    let cache = query.cache;
    let mut last_settled = use_signal(|| None::<PageKey>);

    let view = use_memo(use_reactive!(|page| {
        cache.read().resolve(polls_key(page), *last_settled.peek())
    }));

    let has_next = use_memo(move || view.read().has_next(PAGE_SIZE));

    // Remember the page whose rows were last shown for real.
    use_effect(move || {
        let settled = view.read().settled_key();
        if settled.is_some() && *last_settled.peek() != settled {
            last_settled.set(settled);
        }
    });

    let fetch_query = query.clone();
    use_effect(use_reactive!(|page| {
        fetch_query.ensure(page);
    }));

    use_effect(use_reactive!(|page| {
        if has_next() {
            query.prefetch(page.next());
        }
    }));

    PollsPageState { view, has_next }
}
