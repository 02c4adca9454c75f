use crate::common;
use chrono::{Duration, Utc};
use client::{PageCache, PageKey, PageView, PollsClient};
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, PageIndex, Poll, PollCreate, PAGE_SIZE};

const RESOURCE: &str = "polls";

fn key(page: u32) -> PageKey {
    PageKey::new(RESOURCE, PageIndex::new(page))
}

fn new_cache() -> PageCache<Poll> {
    PageCache::new(Duration::seconds(30), 20)
}

/// Fetch `page` into `cache` if the cache asks for it. Returns whether a
/// request was made.
async fn ensure(cache: &mut PageCache<Poll>, client: &PollsClient, page: u32) -> bool {
    let Some(ticket) = cache.begin_fetch(key(page), Utc::now()) else {
        return false;
    };
    let result = client.list_polls_page(ticket.key.page).await.map(|p| p.data);
    cache.complete(ticket, result, Utc::now());
    true
}

fn ids(view: &PageView<Poll>) -> Vec<String> {
    match view {
        PageView::Loaded { rows, .. } => rows.iter().map(|p| p.id.clone()).collect(),
        other => panic!("expected loaded view, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_requests_for_same_page_are_deduplicated() {
    let (client, backend) = common::spawn_backend(12).await;
    let mut cache = new_cache();

    let first = cache.begin_fetch(key(1), Utc::now()).unwrap();
    assert!(cache.begin_fetch(key(1), Utc::now()).is_none());
    assert!(cache.force_fetch(key(1)).is_none());

    let result = client.list_polls_page(first.key.page).await.map(|p| p.data);
    assert!(cache.complete(first, result, Utc::now()));
    assert_eq!(backend.list_requests().len(), 1);
}

#[tokio::test]
async fn test_fresh_page_is_served_from_cache() {
    let (client, backend) = common::spawn_backend(12).await;
    let mut cache = new_cache();

    assert!(ensure(&mut cache, &client, 1).await);
    assert!(!ensure(&mut cache, &client, 1).await);
    assert_eq!(backend.list_requests(), vec![(0, 5)]);
}

#[tokio::test]
async fn test_navigation_shows_previous_rows_as_placeholder() {
    let (client, _backend) = common::spawn_backend(12).await;
    let mut cache = new_cache();
    ensure(&mut cache, &client, 1).await;
    let shown = cache.resolve(key(1), None).settled_key();
    assert_eq!(shown, Some(key(1)));

    // Page 2 is requested but has not answered yet.
    let ticket = cache.begin_fetch(key(2), Utc::now()).unwrap();
    let pending = cache.resolve(key(2), shown);
    assert!(pending.is_placeholder());
    assert!(!pending.has_next(PAGE_SIZE));
    assert_eq!(ids(&pending), vec!["1", "2", "3", "4", "5"]);

    let result = client.list_polls_page(ticket.key.page).await.map(|p| p.data);
    assert!(cache.complete(ticket, result, Utc::now()));

    let settled = cache.resolve(key(2), shown);
    assert!(!settled.is_placeholder());
    assert!(settled.has_next(PAGE_SIZE));
    assert_eq!(ids(&settled), vec!["6", "7", "8", "9", "10"]);
}

#[tokio::test]
async fn test_prefetched_next_page_needs_no_request() {
    let (client, backend) = common::spawn_backend(12).await;
    let mut cache = new_cache();

    ensure(&mut cache, &client, 1).await;
    let view = cache.resolve(key(1), None);
    if view.has_next(PAGE_SIZE) {
        ensure(&mut cache, &client, 2).await;
    }
    assert_eq!(backend.list_requests(), vec![(0, 5), (5, 5)]);

    // Navigating to page 2 finds it already settled.
    assert!(!ensure(&mut cache, &client, 2).await);
    let next = cache.resolve(key(2), Some(key(1)));
    assert!(!next.is_placeholder());
    assert_eq!(backend.list_requests().len(), 2);
}

#[tokio::test]
async fn test_response_after_invalidation_is_discarded() {
    let (client, _backend) = common::spawn_backend(7).await;
    let mut cache = new_cache();

    let stale = cache.begin_fetch(key(1), Utc::now()).unwrap();
    let stale_result = client.list_polls_page(stale.key.page).await.map(|p| p.data);

    cache.invalidate_resource(RESOURCE);
    client
        .create_poll(&PollCreate {
            title: "Fresh".into(),
            description: None,
        })
        .await
        .unwrap();
    assert!(!cache.complete(stale, stale_result, Utc::now()));

    assert!(ensure(&mut cache, &client, 2).await);
    let view = cache.resolve(key(2), None);
    assert_eq!(ids(&view), vec!["6", "7", "8"]);
}

#[tokio::test]
async fn test_mutation_invalidation_refetches_page() {
    let (client, backend) = common::spawn_backend(3).await;
    let mut cache = new_cache();
    ensure(&mut cache, &client, 1).await;

    client.delete_poll("2").await.unwrap();
    cache.invalidate_resource(RESOURCE);

    // Old rows stay visible until the refetch lands.
    assert_eq!(ids(&cache.resolve(key(1), None)), vec!["1", "2", "3"]);
    assert!(ensure(&mut cache, &client, 1).await);
    assert_eq!(ids(&cache.resolve(key(1), None)), vec!["1", "3"]);
    assert_eq!(backend.list_requests().len(), 2);
}

#[tokio::test]
async fn test_failed_page_shows_error_and_retry_recovers() {
    let (client, backend) = common::spawn_backend(4).await;
    let mut cache = new_cache();

    backend.set_list_failing(true);
    ensure(&mut cache, &client, 1).await;
    match cache.resolve(key(1), None) {
        PageView::Failed(err) => assert_eq!(err.kind, AppErrorKind::InternalError),
        other => panic!("expected failure, got {other:?}"),
    }

    // No automatic hammering of a failing backend.
    assert!(!ensure(&mut cache, &client, 1).await);

    backend.set_list_failing(false);
    let ticket = cache.force_fetch(key(1)).unwrap();
    let result = client.list_polls_page(ticket.key.page).await.map(|p| p.data);
    assert!(cache.complete(ticket, result, Utc::now()));
    assert_eq!(ids(&cache.resolve(key(1), None)), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_failed_refetch_keeps_last_good_rows() {
    let (client, backend) = common::spawn_backend(4).await;
    let mut cache = new_cache();
    ensure(&mut cache, &client, 1).await;

    backend.set_list_failing(true);
    let ticket = cache.force_fetch(key(1)).unwrap();
    let result = client.list_polls_page(ticket.key.page).await.map(|p| p.data);
    assert!(result.is_err());
    cache.complete(ticket, result, Utc::now());

    let view = cache.resolve(key(1), None);
    assert_eq!(ids(&view), vec!["1", "2", "3", "4"]);
}
