//! Domain event system — decoupled communication between bounded contexts.
//!
//! Events are published as a run progresses. Other components can subscribe
//! to react without tight coupling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AgentEvent {
    /// The generation service produced a response
    GenerationCompleted {
        run_id: String,
        model: String,
        tokens_used: u32,
        timestamp: DateTime<Utc>,
    },

    /// An action was dispatched by the executor
    ActionExecuted {
        run_id: String,
        action: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// A run reached a terminal state
    RunCompleted {
        run_id: String,
        success: bool,
        iterations: u32,
        timestamp: DateTime<Utc>,
    },

    /// An error stopped an iteration
    ErrorOccurred {
        run_id: String,
        iteration: u32,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for agent events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
/// Components can subscribe to receive all events and filter for what they care about.
pub struct EventBus {
    sender: broadcast::Sender<Arc<AgentEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: AgentEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<AgentEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(AgentEvent::ActionExecuted {
            run_id: "run-1".into(),
            action: "read_file".into(),
            success: true,
            duration_ms: 42,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            AgentEvent::ActionExecuted { action, success, .. } => {
                assert_eq!(action, "read_file");
                assert!(success);
            }
            _ => panic!("Expected ActionExecuted event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        // Publishing with no subscribers should not panic
        bus.publish(AgentEvent::ErrorOccurred {
            run_id: "run-1".into(),
            iteration: 1,
            error_message: "no subscribers".into(),
            timestamp: Utc::now(),
        });
    }
}
