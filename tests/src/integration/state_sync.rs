//! # State-Sync Delivery
//!
//! Feed to backend to subscriber, under concurrency.
//!
//! ## Properties Tested
//!
//! 1. Concurrent subscribers each see every event, in publish order
//! 2. No delivery after unsubscribe returns, even with a publisher running
//! 3. A slow subscriber loses events without stalling the others
//! 4. Dropping the receiver unregisters the subscriber

#[cfg(test)]
mod tests {
    use crate::support::{state_sync_event, FullNodeFixture, LightNodeFixture};
    use anyhow::{Context, Result};
    use bor_api_backend::BorApiBackend;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    const EVENTS: u64 = 200;

    async fn drain(mut rx: mpsc::Receiver<shared_types::StateSyncEvent>) -> Vec<u64> {
        let mut ids = Vec::new();
        while let Some(event) = rx.recv().await {
            ids.push(event.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_two_subscribers_receive_all_in_order() -> Result<()> {
        let fixture = FullNodeFixture::new();
        let (tx_a, rx_a) = mpsc::channel(EVENTS as usize);
        let (tx_b, rx_b) = mpsc::channel(EVENTS as usize);
        let sub_a = fixture.api().subscribe_state_sync_event(tx_a);
        let sub_b = fixture.api().subscribe_state_sync_event(tx_b);

        let reader_a = tokio::spawn(drain(rx_a));
        let reader_b = tokio::spawn(drain(rx_b));

        let feed = fixture.feed.clone();
        tokio::spawn(async move {
            for id in 0..EVENTS {
                feed.send(state_sync_event(id));
                tokio::task::yield_now().await;
            }
        })
        .await?;

        // Ending the subscriptions drops the feed's senders, closing both channels.
        sub_a.unsubscribe();
        sub_b.unsubscribe();

        let expected: Vec<u64> = (0..EVENTS).collect();
        let got_a = timeout(Duration::from_secs(5), reader_a).await.context("reader a")??;
        let got_b = timeout(Duration::from_secs(5), reader_b).await.context("reader b")??;
        assert_eq!(got_a, expected);
        assert_eq!(got_b, expected);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_no_delivery_after_unsubscribe_under_load() -> Result<()> {
        let fixture = LightNodeFixture::new();
        let (tx, mut rx) = mpsc::channel(1024);
        let subscription = fixture.api().subscribe_state_sync_event(tx);

        let running = Arc::new(AtomicBool::new(true));
        let publisher = {
            let feed = fixture.feed.clone();
            let running = running.clone();
            tokio::spawn(async move {
                let mut id = 0;
                while running.load(Ordering::SeqCst) {
                    feed.send(state_sync_event(id));
                    id += 1;
                    tokio::task::yield_now().await;
                }
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        subscription.unsubscribe();

        // Everything buffered was sent before unsubscribe returned; after
        // draining it the channel must report closed, not pending.
        let mut received = 0;
        while let Some(_event) = timeout(Duration::from_secs(1), rx.recv())
            .await
            .context("channel left open after unsubscribe")?
        {
            received += 1;
        }

        running.store(false, Ordering::SeqCst);
        publisher.await?;
        assert!(received > 0);
        assert_eq!(fixture.feed.subscriber_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_slow_subscriber_drops_without_stalling_others() -> Result<()> {
        let fixture = FullNodeFixture::with_capacity(2);
        let (_slow_sub, mut slow_rx) = fixture.handle.subscribe_state_sync();
        let (fast_tx, mut fast_rx) = mpsc::channel(16);
        let _fast_sub = fixture.api().subscribe_state_sync_event(fast_tx);

        for id in 0..5 {
            fixture.feed.send(state_sync_event(id));
        }

        assert_eq!(fixture.feed.dropped_events(), 3);
        assert_eq!(slow_rx.recv().await.map(|e| e.id), Some(0));
        assert_eq!(slow_rx.recv().await.map(|e| e.id), Some(1));
        for id in 0..5 {
            assert_eq!(fast_rx.recv().await.map(|e| e.id), Some(id));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_pruned() -> Result<()> {
        let fixture = LightNodeFixture::new();
        let (subscription, rx) = fixture.handle.subscribe_state_sync();
        assert_eq!(fixture.feed.subscriber_count(), 1);

        drop(rx);
        assert_eq!(fixture.feed.send(state_sync_event(1)), 0);
        assert_eq!(fixture.feed.subscriber_count(), 0);

        subscription.unsubscribe();
        Ok(())
    }
}
