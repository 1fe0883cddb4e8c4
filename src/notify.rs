use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::ReservationEvent;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for post-commit reservation events, one channel per
/// resource. Stands in for external collaborators (email, webhooks): the
/// engine sends only after the store mutation committed, and a send with no
/// listeners is a no-op — delivery failure never rolls anything back.
pub struct NotifyHub {
    channels: DashMap<Ulid, broadcast::Sender<ReservationEvent>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to events for a resource. Creates the channel if needed.
    pub fn subscribe(&self, resource_id: Ulid) -> broadcast::Receiver<ReservationEvent> {
        let sender = self
            .channels
            .entry(resource_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send an event. No-op if nobody is listening.
    pub fn send(&self, resource_id: Ulid, event: &ReservationEvent) {
        if let Some(sender) = self.channels.get(&resource_id) {
            if sender.send(event.clone()).is_err() {
                tracing::debug!("no live subscribers for resource {resource_id}");
            }
        }
    }

    /// Remove a channel (e.g. when a resource is retired).
    pub fn remove(&self, resource_id: &Ulid) {
        self.channels.remove(resource_id);
    }
}
