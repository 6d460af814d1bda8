//! State-sync feed adapter.
//!
//! Bridges the chain component's [`Feed`] onto the [`StateSyncEventSource`]
//! port. Delivery, buffering and unsubscribe ordering are the feed's.

use crate::ports::{StateSyncEventSource, StateSyncSubscription};
use shared_bus::Feed;
use shared_types::StateSyncEvent;
use tokio::sync::mpsc;
use tracing::debug;

/// Forwards subscriptions to a shared state-sync feed.
#[derive(Clone, Default)]
pub struct StateSyncFeedAdapter {
    feed: Feed<StateSyncEvent>,
}

impl StateSyncFeedAdapter {
    pub fn new(feed: Feed<StateSyncEvent>) -> Self {
        Self { feed }
    }

    /// The underlying feed. The bridge process publishes through this.
    pub fn feed(&self) -> &Feed<StateSyncEvent> {
        &self.feed
    }
}

impl StateSyncEventSource for StateSyncFeedAdapter {
    fn subscribe_state_sync_event(
        &self,
        sink: mpsc::Sender<StateSyncEvent>,
    ) -> StateSyncSubscription {
        let subscription = self.feed.subscribe(sink);
        debug!(
            subscription = %subscription.id(),
            subscribers = self.feed.subscriber_count(),
            "State-sync subscription registered"
        );
        subscription
    }
}
