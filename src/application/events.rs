//! # Event Bus
//!
//! In-process broadcast channel for activity notifications.
//! Producers (the activity feed, the dispatcher itself) publish; the dispatcher subscribes.

use crate::domain::types::ActivityNotification;
use tokio::sync::broadcast;

const BUS_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ActivityNotification>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    /// Publishes a notification. Having no subscribers is not an error.
    pub fn publish(&self, activity: ActivityNotification) {
        if self.sender.send(activity).is_err() {
            tracing::debug!("Activity published with no subscribers.");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActivityNotification> {
        self.sender.subscribe()
    }
}
