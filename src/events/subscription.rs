//! Subscription Expressions
//!
//! Parses host-style subscription expressions such as
//! `topic=studio.action.launch and data.actionIdentifier=x and
//! source.user.username=y` into a filter matched against incoming events.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, Result};
use crate::events::Event;

static CLAUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<key>[A-Za-z._]+)\s*=\s*(?P<value>\S+)").unwrap());

/// Parsed subscription filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionFilter {
    topic: Option<String>,
    action_identifier: Option<String>,
    username: Option<String>,
}

impl SubscriptionFilter {
    /// Parse a subscription expression
    ///
    /// Supported keys: `topic`, `data.actionIdentifier`,
    /// `source.user.username`. The expression must constrain a topic.
    pub fn parse(expression: &str) -> Result<Self> {
        let mut filter = SubscriptionFilter::default();

        for caps in CLAUSE_RE.captures_iter(expression) {
            let key = &caps["key"];
            let value = caps["value"].to_string();

            match key {
                "topic" => filter.topic = Some(value),
                "data.actionIdentifier" => filter.action_identifier = Some(value),
                "source.user.username" => filter.username = Some(value),
                other => {
                    return Err(AppError::Subscription(format!(
                        "Unsupported subscription key: {}",
                        other
                    )));
                }
            }
        }

        if filter.topic.is_none() {
            return Err(AppError::Subscription(format!(
                "Expression does not constrain a topic: {}",
                expression
            )));
        }

        Ok(filter)
    }

    /// The topic this filter is bound to
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Check whether an event satisfies every clause of this filter
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(topic) = &self.topic {
            if *topic != event.topic {
                return false;
            }
        }

        if let Some(identifier) = &self.action_identifier {
            if event.data.action_identifier.as_deref() != Some(identifier) {
                return false;
            }
        }

        if let Some(username) = &self.username {
            if event.source.user.username != *username {
                return false;
            }
        }

        true
    }
}
