//! Keyed page cache with in-flight deduplication.
//!
//! Each `(resource, page)` key owns its own entry, so a response can only
//! ever land under the key it was requested for. Every fetch carries a
//! generation number; a response whose generation no longer matches the
//! entry (because the key was invalidated or refetched meanwhile) is dropped.

use chrono::{DateTime, Duration, Utc};
use shared_types::{AppError, CacheSettings, PageIndex};
use std::collections::HashMap;
use tracing::debug;

/// A failed page is not retried automatically for at least this long.
const FAILURE_BACKOFF_SECS: i64 = 5;

/// Cache key: a list resource plus a page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub resource: &'static str,
    pub page: PageIndex,
}

impl PageKey {
    pub fn new(resource: &'static str, page: PageIndex) -> Self {
        Self { resource, page }
    }

    pub fn next(self) -> Self {
        Self::new(self.resource, self.page.next())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Idle,
    Fetching,
    Failed(AppError),
}

/// Proof that a fetch was started; hand it back to [`PageCache::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: PageKey,
    generation: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    status: FetchStatus,
    data: Option<Vec<T>>,
    settled_at: Option<DateTime<Utc>>,
    generation: u64,
    invalidated: bool,
}

impl<T> CacheEntry<T> {
    fn empty() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            settled_at: None,
            generation: 0,
            invalidated: false,
        }
    }

    fn is_fetching(&self) -> bool {
        self.status == FetchStatus::Fetching
    }

    fn is_fresh(&self, now: DateTime<Utc>, stale_after: Duration) -> bool {
        if self.invalidated {
            return false;
        }
        let Some(settled_at) = self.settled_at else {
            return false;
        };
        let window = match self.status {
            FetchStatus::Failed(_) => stale_after.max(Duration::seconds(FAILURE_BACKOFF_SECS)),
            _ => stale_after,
        };
        now - settled_at < window
    }
}

/// What a list view should render for a requested page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView<T> {
    /// Nothing to show yet; render skeletons.
    Loading,
    /// Rows to render. `placeholder` rows belong to `shown`, a previously
    /// displayed page, and stand in until the requested page arrives.
    Loaded {
        rows: Vec<T>,
        placeholder: bool,
        refreshing: bool,
        shown: PageKey,
    },
    /// The requested page failed and there is nothing to fall back on.
    Failed(AppError),
}

impl<T> PageView<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PageView::Loaded { placeholder: true, .. })
    }

    /// "There may be more": the page is real data and exactly full.
    ///
    /// Without a total count a completely full last page still reports
    /// `true`; the following page then comes back empty.
    pub fn has_next(&self, page_size: u32) -> bool {
        match self {
            PageView::Loaded {
                rows,
                placeholder: false,
                ..
            } => rows.len() == page_size as usize,
            _ => false,
        }
    }

    /// The key whose data is displayed as real rows, if any.
    pub fn settled_key(&self) -> Option<PageKey> {
        match self {
            PageView::Loaded {
                placeholder: false,
                shown,
                ..
            } => Some(*shown),
            _ => None,
        }
    }
}

/// In-memory cache of fetched pages.
#[derive(Debug, Clone)]
pub struct PageCache<T> {
    entries: HashMap<PageKey, CacheEntry<T>>,
    stale_after: Duration,
    max_pages: usize,
    next_generation: u64,
}

impl<T: Clone> PageCache<T> {
    pub fn new(stale_after: Duration, max_pages: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            max_pages: max_pages.max(2),
            next_generation: 1,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        let secs = i64::try_from(settings.stale_secs).unwrap_or(i64::MAX);
        let stale_after = Duration::try_seconds(secs).unwrap_or(Duration::MAX);
        Self::new(stale_after, settings.max_pages)
    }

    /// Start a fetch for `key` unless it is already in flight or still fresh.
    pub fn begin_fetch(&mut self, key: PageKey, now: DateTime<Utc>) -> Option<FetchTicket> {
        let stale_after = self.stale_after;
        let entry = self.entries.entry(key).or_insert_with(CacheEntry::empty);
        if entry.is_fetching() || entry.is_fresh(now, stale_after) {
            return None;
        }
        Some(self.start(key))
    }

    /// Start a fetch for `key` regardless of freshness. Still refuses to
    /// issue a second request while one is in flight.
    pub fn force_fetch(&mut self, key: PageKey) -> Option<FetchTicket> {
        let entry = self.entries.entry(key).or_insert_with(CacheEntry::empty);
        if entry.is_fetching() {
            return None;
        }
        Some(self.start(key))
    }

    fn start(&mut self, key: PageKey) -> FetchTicket {
        let generation = self.next_generation;
        self.next_generation += 1;
        let entry = self.entries.entry(key).or_insert_with(CacheEntry::empty);
        entry.status = FetchStatus::Fetching;
        entry.generation = generation;
        debug!(resource = key.resource, page = %key.page, generation, "fetch started");
        FetchTicket { key, generation }
    }

    /// Record the outcome of a fetch. Returns `false` when the response was
    /// superseded and discarded.
    ///
    /// A failure keeps whatever rows the entry already had.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<T>, AppError>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.generation != ticket.generation || !entry.is_fetching() {
            debug!(
                resource = ticket.key.resource,
                page = %ticket.key.page,
                "discarding superseded response"
            );
            return false;
        }

        entry.settled_at = Some(now);
        entry.invalidated = false;
        match result {
            Ok(rows) => {
                entry.data = Some(rows);
                entry.status = FetchStatus::Idle;
            }
            Err(err) => {
                entry.status = FetchStatus::Failed(err);
            }
        }
        self.evict_overflow(ticket.key);
        true
    }

    /// Mark every page of `resource` stale. Cached rows stay visible until
    /// the refetch lands; in-flight responses for those pages are discarded.
    pub fn invalidate_resource(&mut self, resource: &str) {
        for (key, entry) in self.entries.iter_mut() {
            if key.resource != resource {
                continue;
            }
            entry.invalidated = true;
            if entry.is_fetching() {
                entry.generation = 0;
                entry.status = FetchStatus::Idle;
            }
        }
    }

    /// Resolve what to display for `key`.
    ///
    /// `previous` is the last page shown with real rows; its data stands in
    /// as a placeholder while `key` has nothing of its own.
    pub fn resolve(&self, key: PageKey, previous: Option<PageKey>) -> PageView<T> {
        let entry = self.entries.get(&key);

        if let Some(entry) = entry {
            if let Some(rows) = &entry.data {
                return PageView::Loaded {
                    rows: rows.clone(),
                    placeholder: false,
                    refreshing: entry.is_fetching(),
                    shown: key,
                };
            }
            if let FetchStatus::Failed(err) = &entry.status {
                return PageView::Failed(err.clone());
            }
        }

        let fallback = previous
            .filter(|prev| *prev != key && prev.resource == key.resource)
            .and_then(|prev| self.data(prev).map(|rows| (prev, rows)));

        match fallback {
            Some((prev, rows)) => PageView::Loaded {
                rows: rows.to_vec(),
                placeholder: true,
                refreshing: true,
                shown: prev,
            },
            None => PageView::Loading,
        }
    }

    pub fn data(&self, key: PageKey) -> Option<&[T]> {
        self.entries.get(&key).and_then(|e| e.data.as_deref())
    }

    pub fn status(&self, key: PageKey) -> Option<&FetchStatus> {
        self.entries.get(&key).map(|e| &e.status)
    }

    pub fn is_fetching(&self, key: PageKey) -> bool {
        self.entries.get(&key).is_some_and(|e| e.is_fetching())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the oldest settled pages beyond `max_pages`. In-flight entries
    /// and `keep` are never evicted.
    fn evict_overflow(&mut self, keep: PageKey) {
        loop {
            let settled = self.entries.values().filter(|e| !e.is_fetching()).count();
            if settled <= self.max_pages {
                return;
            }
            let oldest = self
                .entries
                .iter()
                .filter(|(k, e)| **k != keep && !e.is_fetching())
                .min_by_key(|(_, e)| e.settled_at)
                .map(|(k, _)| *k);
            match oldest {
                Some(key) => {
                    debug!(resource = key.resource, page = %key.page, "evicting cached page");
                    self.entries.remove(&key);
                }
                None => return,
            }
        }
    }
}
