//! # Shared Bus - Typed Event Feeds
//!
//! One-to-many delivery of chain events (state-sync records relayed from the
//! root chain) into channels owned by subscribers.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Chain        │      send()        │ Subscriber   │
//! │ component    │ ──────┐            │ (mpsc rx)    │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐           │ try_send
//!                  │   Feed<T>    │ ──────────┘
//!                  └──────────────┘  subscribe(tx)
//! ```
//!
//! ## Delivery Policy
//!
//! - **Caller-owned channels:** subscribers hand the feed the write end of a
//!   bounded `tokio::sync::mpsc` channel; the feed never allocates buffers.
//! - **Bounded buffer + drop:** a full channel drops that event for that
//!   subscriber only. Publishing never blocks on a slow subscriber.
//! - **Per-subscriber order:** publishes are serialized, so every subscriber
//!   sees events in publish order. No cross-subscriber ordering is promised.
//! - **Unsubscribe is a barrier:** once `Subscription::unsubscribe` returns,
//!   no further event reaches that channel.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use publisher::Feed;
pub use subscriber::{Subscription, SubscriptionId};

/// Suggested capacity for subscriber channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
