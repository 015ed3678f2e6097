//! In-process realtime events.
//!
//! Notification inserts are pushed to subscribers over per-member broadcast
//! channels. A subscription is keyed by member identity and delivers events
//! until it is dropped or explicitly unsubscribed; publishing prunes
//! channels nobody listens to anymore.

use crate::types::{MemberId, Notification};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of each member's event channel; slow subscribers lose oldest
/// events rather than blocking publishers.
const CHANNEL_CAPACITY: usize = 64;

/// An event pushed to subscribers
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// A notification was inserted for the subscribed member
    NotificationAdded(Notification),
}

/// Per-member broadcast channels
pub struct EventBus {
    channels: Mutex<HashMap<MemberId, broadcast::Sender<BoardEvent>>>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to events for one member
    pub fn subscribe(&self, member: &MemberId) -> Subscription {
        let mut channels = self.channels.lock().unwrap();
        let sender = channels
            .entry(member.clone())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);

        Subscription {
            member: member.clone(),
            receiver: sender.subscribe(),
        }
    }

    /// Publish an event to a member's subscribers.
    ///
    /// Returns the number of subscribers that received it. Channels with no
    /// remaining subscribers are removed.
    pub fn publish(&self, member: &MemberId, event: BoardEvent) -> usize {
        let mut channels = self.channels.lock().unwrap();

        let delivered = match channels.get(member) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        };

        if delivered == 0 && channels.remove(member).is_some() {
            debug!(member = %member, "pruned event channel with no subscribers");
        }

        delivered
    }

    /// Number of members with live channels (test/diagnostic aid)
    pub fn channel_count(&self) -> usize {
        self.channels.lock().unwrap().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription for one member's events.
///
/// Dropping the subscription tears it down; `unsubscribe` does the same
/// explicitly.
pub struct Subscription {
    member: MemberId,
    receiver: broadcast::Receiver<BoardEvent>,
}

impl Subscription {
    /// The member this subscription is keyed by
    pub fn member(&self) -> &MemberId {
        &self.member
    }

    /// Receive the next event. Returns `None` once the channel is gone.
    /// A lagged subscriber skips dropped events and keeps receiving.
    pub async fn recv(&mut self) -> Option<BoardEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(member = %self.member, skipped, "subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Tear the subscription down
    pub fn unsubscribe(self) {
        drop(self);
    }
}
