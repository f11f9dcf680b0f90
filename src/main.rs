use anyhow::Context;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thumbsync::action::BatchImportThumbnailsAction;
use thumbsync::config::config::AppConfig;
use thumbsync::config::loader::ConfigLoader;
use thumbsync::events::{Event, EventData, LocalEventHub, SelectionItem, topics};
use thumbsync::host::memory::InMemorySession;
use thumbsync::models::entity::Location;
use thumbsync::models::manifest::ProjectManifest;
use thumbsync::observability::{AppMetrics, init_tracing};
use tracing::info;

/// 演练入口：从 JSON 清单构建内存层级，注册动作，重放 discover 与 launch
/// 事件，打印匹配与导入结果。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match ConfigLoader::load() {
        Ok(loaded) if ConfigLoader::validate(&loaded).is_ok() => loaded,
        _ => AppConfig::development(),
    };
    let _log_guard = init_tracing("thumbsync", &config.logging);
    info!("Starting Thumbsync ({})...", config.environment);

    let usage = "Usage: thumbsync <manifest.json> <folder>";
    let mut args = std::env::args().skip(1);
    let manifest_path = PathBuf::from(args.next().context(usage)?);
    let folder_path = args.next().context(usage)?;

    let manifest = ProjectManifest::from_file(&manifest_path)?;
    let session = Arc::new(InMemorySession::new());
    session.add_location(Location::new(&config.host.location_name));
    let project_id = manifest.load_into(&session);
    info!(
        "Hierarchy manifest loaded from {} (project {})",
        manifest_path.display(),
        project_id
    );

    let metrics = Arc::new(AppMetrics::default());
    let hub = LocalEventHub::new();
    let action = Arc::new(BatchImportThumbnailsAction::new(
        session.clone(),
        &config,
        metrics.clone(),
    ));
    action.register(&hub)?;

    let selection = vec![SelectionItem::new(&project_id, "show")];

    let discover = Event::new(
        topics::ACTION_DISCOVER,
        EventData {
            selection: selection.clone(),
            ..Default::default()
        },
        &config.host.api_user,
    );
    let replies = hub.publish(&discover).await;
    info!("Discover replies: {}", serde_json::to_string(&replies)?);

    let launch = Event::new(
        topics::ACTION_LAUNCH,
        EventData {
            selection,
            action_identifier: Some(BatchImportThumbnailsAction::IDENTIFIER.to_string()),
            values: Some(HashMap::from([(
                "folder_path".to_string(),
                folder_path,
            )])),
        },
        &config.host.api_user,
    );
    let replies = hub.publish(&launch).await;
    for reply in &replies {
        println!("{}", serde_json::to_string_pretty(reply)?);
    }

    print!("{}", metrics.gather());
    Ok(())
}
