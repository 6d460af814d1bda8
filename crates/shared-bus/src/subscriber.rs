//! # Event Subscriber
//!
//! Subscription handles handed out by a [`Feed`](crate::Feed).

use crate::publisher::FeedInner;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;
use tracing::debug;

/// Identifier of a subscription within its feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// A live registration of a subscriber channel.
///
/// The feed is the lifetime authority over delivery; the holder of this
/// handle can only end it. Dropping the handle unsubscribes.
pub struct Subscription<T> {
    id: SubscriptionId,
    feed: Weak<FeedInner<T>>,
    active: AtomicBool,
}

impl<T> Subscription<T> {
    pub(crate) fn new(id: SubscriptionId, feed: Weak<FeedInner<T>>) -> Self {
        Self {
            id,
            feed,
            active: AtomicBool::new(true),
        }
    }

    /// Identifier within the feed.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stop delivery to this subscription's channel.
    ///
    /// Idempotent. When this returns, no further event will be written to
    /// the channel.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(feed) = self.feed.upgrade() {
            feed.remove(self.id);
        }
        debug!(subscription = %self.id, "Subscription ended");
    }

    /// True until unsubscribed and while the feed is alive.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) && self.feed.strong_count() > 0
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active.load(Ordering::SeqCst))
            .finish()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
