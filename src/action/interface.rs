//! Action Interface Types
//!
//! Wire shapes exchanged with the host UI: discover menu entries, form
//! items shown to collect input, and the final launch result.

use serde::{Deserialize, Serialize};

/// One entry in the host's action menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Menu label
    pub label: String,
    /// Menu description
    pub description: String,
    /// Identifier the launch event refers back to
    pub action_identifier: String,
}

/// Reply to a discover event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverResponse {
    /// Advertised menu entries
    pub items: Vec<ActionItem>,
}

/// One widget of a form returned to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InterfaceItem {
    /// Informational text
    Label { value: String },
    /// Single-line text input
    Text { label: String, name: String },
}

/// Final outcome of a launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the run succeeded
    pub success: bool,
    /// Message shown to the user
    pub message: String,
}

/// Reply to a launch event: either a form to fill in, or a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LaunchResponse {
    /// Form the host presents before re-invoking the launch
    Form { items: Vec<InterfaceItem> },
    /// Terminal outcome
    Result(ActionResult),
}

impl LaunchResponse {
    /// Successful terminal outcome
    pub fn success(message: &str) -> Self {
        LaunchResponse::Result(ActionResult {
            success: true,
            message: message.to_string(),
        })
    }

    /// Failed terminal outcome
    pub fn failure(message: &str) -> Self {
        LaunchResponse::Result(ActionResult {
            success: false,
            message: message.to_string(),
        })
    }
}
