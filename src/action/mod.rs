//! Batch Import Thumbnails Action
//!
//! Event-driven plugin surface: answers discover events with a menu entry
//! when a single project is selected, and drives the launch state machine
//! (collect folder path, validate, import, report) on launch events.

pub mod interface;

pub use interface::{ActionItem, ActionResult, DiscoverResponse, InterfaceItem, LaunchResponse};

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::config::AppConfig;
use crate::error::Result;
use crate::events::{Event, EventHandler, LocalEventHub, topics};
use crate::host::session::HostSession;
use crate::observability::AppMetrics;
use crate::services::importer::{ImportService, create_import_service};

/// Help text shown above the folder-path field
const UI_HELP: &str = "The action will batch import thumbnails to the selected project.\n\n\
Specify a *folder path* to a folder containing the images.\n\n\
The images should be named to match the entity path in the tracker.\n\n\
For example:\n\n    0010.png\n    0010.010.png\n    0010.010.generic.png\n\n\
This will set the thumbnail for the *sequence*, *shot* and the *generic task*.";

/// Outcome of validating the submitted form values
enum InputValidation {
    /// No folder path submitted yet
    Missing,
    /// A folder path was submitted but does not name a directory
    Invalid(String),
    /// Ready to process
    Valid(PathBuf),
}

/// Batch thumbnail import action
pub struct BatchImportThumbnailsAction {
    importer: Box<dyn ImportService>,
    metrics: Arc<AppMetrics>,
    username: String,
    priority: u32,
}

impl BatchImportThumbnailsAction {
    /// Menu label
    pub const LABEL: &'static str = "Batch Import Thumbnails";
    /// Action identifier launch events refer back to
    pub const IDENTIFIER: &'static str = "studio.batch.import.thumbnails";
    /// Menu description
    pub const DESCRIPTION: &'static str = "Batch import thumbnails from folder to project.";
    /// Terminal success message
    pub const SUCCESS_MESSAGE: &'static str =
        "Batch Import Thumbnails action completed successfully";

    /// Create the action over a host session
    pub fn new(session: Arc<dyn HostSession>, config: &AppConfig, metrics: Arc<AppMetrics>) -> Self {
        let importer =
            create_import_service(session, &config.host.location_name, metrics.clone());
        Self {
            importer,
            metrics,
            username: config.host.api_user.clone(),
            priority: config.action.priority,
        }
    }

    /// Subscribe the discover and launch handlers on the hub
    pub fn register(self: &Arc<Self>, hub: &LocalEventHub) -> Result<()> {
        let discover_subscription = format!(
            "topic={} and source.user.username={}",
            topics::ACTION_DISCOVER,
            self.username
        );
        hub.subscribe(
            &discover_subscription,
            self.priority,
            self.clone() as Arc<dyn EventHandler>,
        )?;

        let launch_subscription = format!(
            "topic={} and data.actionIdentifier={} and source.user.username={}",
            topics::ACTION_LAUNCH,
            Self::IDENTIFIER,
            self.username
        );
        hub.subscribe(
            &launch_subscription,
            self.priority,
            self.clone() as Arc<dyn EventHandler>,
        )?;

        tracing::info!("Registered action '{}'", Self::IDENTIFIER);
        Ok(())
    }

    /// Answer a discover event
    ///
    /// `None` unless the selection is exactly one project-type entity.
    pub fn discover(&self, event: &Event) -> Option<DiscoverResponse> {
        self.metrics.record_discover_request();

        if !Self::validate_selection(event) {
            return None;
        }

        Some(DiscoverResponse {
            items: vec![ActionItem {
                label: Self::LABEL.to_string(),
                description: Self::DESCRIPTION.to_string(),
                action_identifier: Self::IDENTIFIER.to_string(),
            }],
        })
    }

    /// Answer a launch event
    pub async fn launch(&self, event: &Event) -> LaunchResponse {
        self.metrics.record_launch_request();

        let folder_path = match Self::validate_input(event.data.values.as_ref()) {
            InputValidation::Missing => return Self::form(None),
            InputValidation::Invalid(reason) => {
                tracing::warn!("Rejected folder path input: {}", reason);
                return Self::form(Some(&reason));
            }
            InputValidation::Valid(folder_path) => folder_path,
        };

        let Some(selected) = event.data.selection.first() else {
            return LaunchResponse::failure("Launch event carries no selected project");
        };

        match self
            .importer
            .import_thumbnails(&selected.entity_id, &folder_path)
            .await
        {
            Ok(report) => {
                tracing::info!(
                    "{} ({} entities updated)",
                    Self::SUCCESS_MESSAGE,
                    report.entities_updated
                );
                LaunchResponse::success(Self::SUCCESS_MESSAGE)
            }
            Err(err) => {
                LaunchResponse::failure(&format!("Batch import thumbnails failed: {}", err))
            }
        }
    }

    /// Selection is valid when it consists of a single project entity
    fn validate_selection(event: &Event) -> bool {
        let selection = &event.data.selection;
        selection.len() == 1 && selection[0].entity_type == "show"
    }

    /// Validate the submitted form values
    fn validate_input(values: Option<&HashMap<String, String>>) -> InputValidation {
        let Some(values) = values else {
            return InputValidation::Missing;
        };

        let Some(folder_path) = values.get("folder_path") else {
            return InputValidation::Missing;
        };

        if folder_path.is_empty() {
            return InputValidation::Missing;
        }

        let path = PathBuf::from(folder_path);
        if !path.is_dir() {
            return InputValidation::Invalid(format!(
                "'{}' is not an existing folder",
                folder_path
            ));
        }

        InputValidation::Valid(path)
    }

    /// Build the folder-path form, optionally led by a validation message
    fn form(validation_error: Option<&str>) -> LaunchResponse {
        let mut items = Vec::new();
        if let Some(reason) = validation_error {
            items.push(InterfaceItem::Label {
                value: format!("Invalid input: {}", reason),
            });
        }
        items.push(InterfaceItem::Label {
            value: UI_HELP.to_string(),
        });
        items.push(InterfaceItem::Text {
            label: "Folder path".to_string(),
            name: "folder_path".to_string(),
        });

        LaunchResponse::Form { items }
    }
}

#[async_trait]
impl EventHandler for BatchImportThumbnailsAction {
    async fn handle(&self, event: &Event) -> Result<Option<serde_json::Value>> {
        match event.topic.as_str() {
            topics::ACTION_DISCOVER => match self.discover(event) {
                Some(response) => Ok(Some(serde_json::to_value(response)?)),
                None => Ok(None),
            },
            topics::ACTION_LAUNCH => Ok(Some(serde_json::to_value(self.launch(event).await)?)),
            _ => Ok(None),
        }
    }
}
