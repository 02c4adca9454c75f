use crate::common;
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, PageIndex, PollCreate, PollUpdate};

#[tokio::test]
async fn test_create_then_get_poll() {
    let (client, backend) = common::spawn_backend(0).await;
    let created = client
        .create_poll(&PollCreate {
            title: "Team lunch".into(),
            description: Some("Pick a place".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.title, "Team lunch");
    assert_eq!(backend.poll_count(), 1);

    let fetched = client.get_poll(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_without_description() {
    let (client, _backend) = common::spawn_backend(0).await;
    let created = client
        .create_poll(&PollCreate {
            title: "Bare".into(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(created.display_description(), None);
}

#[tokio::test]
async fn test_create_with_blank_title_is_validation_error() {
    let (client, backend) = common::spawn_backend(0).await;
    let err = client
        .create_poll(&PollCreate {
            title: "  ".into(),
            description: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(
        err.field_errors.get("title").map(String::as_str),
        Some("String should have at least 1 character")
    );
    assert_eq!(backend.poll_count(), 0);
}

#[tokio::test]
async fn test_update_changes_only_sent_fields() {
    let (client, _backend) = common::spawn_backend(1).await;
    let updated = client
        .update_poll(
            "1",
            &PollUpdate {
                title: Some("Renamed".into()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.display_description(), Some("Description 1"));
}

#[tokio::test]
async fn test_update_missing_poll_is_not_found() {
    let (client, _backend) = common::spawn_backend(1).await;
    let err = client
        .update_poll("99", &PollUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Poll not found");
}

#[tokio::test]
async fn test_delete_poll_removes_it() {
    let (client, backend) = common::spawn_backend(2).await;
    let msg = client.delete_poll("1").await.unwrap();
    assert_eq!(msg.message, "Poll deleted successfully");
    assert_eq!(backend.poll_count(), 1);

    let err = client.get_poll("1").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);

    let page = client.list_polls_page(PageIndex::FIRST).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "2");
}

#[tokio::test]
async fn test_server_error_maps_to_internal_with_detail() {
    let (client, backend) = common::spawn_backend(2).await;
    backend.set_list_failing(true);
    let err = client.list_polls_page(PageIndex::FIRST).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(err.friendly_message(), "Database unavailable");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = common::unreachable_client().await;
    let err = client.list_polls_page(PageIndex::FIRST).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Network);
    assert!(err.is_retryable());
}
