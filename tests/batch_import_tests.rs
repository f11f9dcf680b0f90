// Integration tests for the batch import action
//
// Drives the action end to end through the local event hub over an
// in-memory host session: discover filtering, form round-trips, matching,
// component reuse and commit visibility.

use std::collections::HashMap;
use std::sync::Arc;

use thumbsync::action::BatchImportThumbnailsAction;
use thumbsync::config::config::AppConfig;
use thumbsync::events::{Event, EventData, LocalEventHub, SelectionItem, topics};
use thumbsync::host::memory::InMemorySession;
use thumbsync::models::entity::{Entity, Location};
use thumbsync::observability::AppMetrics;

fn seeded_session() -> Arc<InMemorySession> {
    let session = InMemorySession::new();
    session.add_entity(
        None,
        Entity::new("p-1", "show1", "Project").with_full_name("Show1"),
    );
    session.add_entity(Some("p-1"), Entity::new("sq-1", "0010", "Sequence"));
    session.add_entity(Some("sq-1"), Entity::new("sh-1", "0010.010", "Shot"));
    session.add_entity(Some("sh-1"), Entity::new("t-1", "0010.010.generic", "Task"));
    session.add_location(Location::new("studio.server"));
    Arc::new(session)
}

fn registered_hub(session: Arc<InMemorySession>) -> (LocalEventHub, Arc<AppMetrics>) {
    let config = AppConfig::development();
    let metrics = Arc::new(AppMetrics::default());
    let hub = LocalEventHub::new();
    let action = Arc::new(BatchImportThumbnailsAction::new(
        session,
        &config,
        metrics.clone(),
    ));
    action.register(&hub).unwrap();
    (hub, metrics)
}

fn discover_event(selection: Vec<SelectionItem>) -> Event {
    Event::new(
        topics::ACTION_DISCOVER,
        EventData {
            selection,
            ..Default::default()
        },
        "dev",
    )
}

fn launch_event(folder_path: &str) -> Event {
    Event::new(
        topics::ACTION_LAUNCH,
        EventData {
            selection: vec![SelectionItem::new("p-1", "show")],
            action_identifier: Some(BatchImportThumbnailsAction::IDENTIFIER.to_string()),
            values: Some(HashMap::from([(
                "folder_path".to_string(),
                folder_path.to_string(),
            )])),
        },
        "dev",
    )
}

#[tokio::test]
async fn full_run_assigns_one_thumbnail_per_entity() {
    let session = seeded_session();
    let (hub, metrics) = registered_hub(session.clone());

    let dir = tempfile::tempdir().unwrap();
    for name in ["0010.png", "0010.010.png", "0010.010.generic.png"] {
        std::fs::write(dir.path().join(name), b"png").unwrap();
    }

    let replies = hub
        .publish(&launch_event(&dir.path().to_string_lossy()))
        .await;

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["success"], true);

    let sequence = session.thumbnail_of("sq-1").unwrap();
    let shot = session.thumbnail_of("sh-1").unwrap();
    let task = session.thumbnail_of("t-1").unwrap();
    assert_ne!(sequence, shot);
    assert_ne!(shot, task);
    assert_eq!(session.pending_count(), 0);

    assert_eq!(
        session.component(&sequence).unwrap().file_path,
        dir.path().join("0010.png")
    );
    assert!(metrics.gather().contains("thumbnails_assigned_total 3"));
}

#[tokio::test]
async fn partial_file_set_matches_only_the_sequence() {
    let session = seeded_session();
    let (hub, _metrics) = registered_hub(session.clone());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("0010.png"), b"png").unwrap();

    let replies = hub
        .publish(&launch_event(&dir.path().to_string_lossy()))
        .await;

    assert_eq!(replies[0]["success"], true);
    assert!(session.thumbnail_of("sq-1").is_some());
    assert!(session.thumbnail_of("sh-1").is_none());
    assert!(session.thumbnail_of("t-1").is_none());
}

#[tokio::test]
async fn one_file_covers_every_entity_sharing_its_suffix() {
    let session = InMemorySession::new();
    session.add_entity(
        None,
        Entity::new("p-1", "show1", "Project").with_full_name("Show1"),
    );
    session.add_entity(Some("p-1"), Entity::new("sh-a", "A.010", "Shot"));
    session.add_entity(Some("p-1"), Entity::new("sh-b", "B.010", "Shot"));
    session.add_location(Location::new("studio.server"));
    let session = Arc::new(session);

    let (hub, _metrics) = registered_hub(session.clone());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("010.png"), b"png").unwrap();

    let replies = hub
        .publish(&launch_event(&dir.path().to_string_lossy()))
        .await;

    assert_eq!(replies[0]["success"], true);
    let first = session.thumbnail_of("sh-a").unwrap();
    let second = session.thumbnail_of("sh-b").unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn discover_ignores_multi_entity_selection() {
    let (hub, _metrics) = registered_hub(seeded_session());

    let replies = hub
        .publish(&discover_event(vec![
            SelectionItem::new("p-1", "show"),
            SelectionItem::new("p-2", "show"),
        ]))
        .await;
    assert!(replies.is_empty());

    let replies = hub
        .publish(&discover_event(vec![SelectionItem::new("p-1", "show")]))
        .await;
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0]["items"][0]["actionIdentifier"],
        BatchImportThumbnailsAction::IDENTIFIER
    );
}

#[tokio::test]
async fn missing_folder_reprompts_and_leaves_session_untouched() {
    let session = seeded_session();
    let (hub, _metrics) = registered_hub(session.clone());

    let replies = hub.publish(&launch_event("/no/such/folder")).await;

    assert_eq!(replies.len(), 1);
    let items = replies[0]["items"].as_array().expect("expected a form");
    assert_eq!(items[0]["type"], "label");
    assert!(
        items[0]["value"]
            .as_str()
            .unwrap()
            .contains("not an existing folder")
    );
    assert_eq!(items.last().unwrap()["name"], "folder_path");

    assert_eq!(session.pending_count(), 0);
    assert!(session.thumbnail_of("sq-1").is_none());
}

#[tokio::test]
async fn launch_for_another_action_is_not_handled() {
    let (hub, _metrics) = registered_hub(seeded_session());

    let mut event = launch_event("/tmp");
    event.data.action_identifier = Some("studio.some.other.action".to_string());

    let replies = hub.publish(&event).await;
    assert!(replies.is_empty());
}
