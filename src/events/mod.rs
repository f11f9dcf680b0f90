//! Event Module
//!
//! Provides the event envelope delivered by the host framework, the
//! subscription-expression filter, and a local in-process event hub with
//! priority-ordered topic dispatch.

pub mod hub;
pub mod subscription;

pub use hub::{EventHandler, LocalEventHub};
pub use subscription::SubscriptionFilter;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Well-known action topics
pub mod topics {
    /// Fired when the host collects menu entries for a selection
    pub const ACTION_DISCOVER: &str = "studio.action.discover";
    /// Fired when the user runs a discovered action
    pub const ACTION_LAUNCH: &str = "studio.action.launch";
}

/// One selected entity in an event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionItem {
    /// Selected entity identifier
    pub entity_id: String,
    /// Host-side selection type ("show" marks a project)
    pub entity_type: String,
}

impl SelectionItem {
    /// Create a new selection item
    pub fn new(entity_id: &str, entity_type: &str) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            entity_type: entity_type.to_string(),
        }
    }
}

/// Event payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventData {
    /// Selected entities, ordered as in the host UI
    pub selection: Vec<SelectionItem>,

    /// Target action identifier (launch events only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_identifier: Option<String>,

    /// Values submitted through a previously returned form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<HashMap<String, String>>,
}

/// Event origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSource {
    /// Originating user
    pub user: EventUser,
}

/// Originating user of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUser {
    /// Username the subscription expressions filter on
    pub username: String,
}

/// Event envelope delivered to handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier
    pub id: String,
    /// Event topic
    pub topic: String,
    /// Payload
    pub data: EventData,
    /// Origin
    pub source: EventSource,
    /// Emission timestamp
    pub sent: DateTime<Utc>,
}

impl Event {
    /// Create a new event for the given topic and user
    pub fn new(topic: &str, data: EventData, username: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            data,
            source: EventSource {
                user: EventUser {
                    username: username.to_string(),
                },
            },
            sent: Utc::now(),
        }
    }
}
