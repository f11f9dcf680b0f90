//! Local Event Hub
//!
//! In-process stand-in for the host's event hub: handlers subscribe with an
//! expression and a priority, publish dispatches matching handlers in
//! ascending priority order (insertion order breaks ties) and collects their
//! replies.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::Result;
use crate::events::{Event, SubscriptionFilter};

/// Handler invoked for events matching a subscription
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle one event; `None` means no reply for this event
    async fn handle(&self, event: &Event) -> Result<Option<serde_json::Value>>;
}

struct Subscription {
    filter: SubscriptionFilter,
    priority: u32,
    handler: Arc<dyn EventHandler>,
}

/// In-process event hub
#[derive(Default)]
pub struct LocalEventHub {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl LocalEventHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for events matching the expression
    pub fn subscribe(
        &self,
        expression: &str,
        priority: u32,
        handler: Arc<dyn EventHandler>,
    ) -> Result<()> {
        let filter = SubscriptionFilter::parse(expression)?;
        tracing::debug!(
            "Subscribed handler (priority {}) to topic '{}'",
            priority,
            filter.topic().unwrap_or("*")
        );

        self.subscriptions.write().push(Subscription {
            filter,
            priority,
            handler,
        });

        Ok(())
    }

    /// Number of registered subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Dispatch an event to every matching handler, collecting replies
    ///
    /// A failing handler is logged and skipped; it never poisons the hub.
    pub async fn publish(&self, event: &Event) -> Vec<serde_json::Value> {
        // Snapshot outside the await points; the registry lock is not held
        // across handler execution.
        let mut matching: Vec<(u32, usize, Arc<dyn EventHandler>)> = {
            let subscriptions = self.subscriptions.read();
            subscriptions
                .iter()
                .enumerate()
                .filter(|(_, s)| s.filter.matches(event))
                .map(|(index, s)| (s.priority, index, s.handler.clone()))
                .collect()
        };
        matching.sort_by_key(|(priority, index, _)| (*priority, *index));

        let mut replies = Vec::new();
        for (_, _, handler) in matching {
            match handler.handle(event).await {
                Ok(Some(reply)) => replies.push(reply),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!("Event handler failed for topic '{}': {}", event.topic, err);
                }
            }
        }

        replies
    }
}
