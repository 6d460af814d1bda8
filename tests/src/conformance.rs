//! # Backend Conformance
//!
//! Contract checks every `BorApiBackend` must pass, written once and run
//! against both the full-node and the light-node backend. Receipt checks
//! apply to `BorReceiptApi` implementors only.

use anyhow::{ensure, Context, Result};
use bor_api_backend::{BackendError, BorApiBackend, BorReceiptApi};
use shared_bus::Feed;
use shared_types::{Hash, QueryContext, SideChainReceipt, StateSyncEvent, ZERO_HASH};
use tokio::sync::mpsc;

use crate::support::state_sync_event;

/// A subscriber receives what the feed publishes, verbatim, and nothing
/// after it unsubscribes.
pub fn check_subscription_lifecycle(
    backend: &dyn BorApiBackend,
    feed: &Feed<StateSyncEvent>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(8);
    let subscription = backend.subscribe_state_sync_event(tx);

    let event = state_sync_event(1);
    ensure!(feed.send(event.clone()) == 1, "event not delivered");
    let received = rx.try_recv().context("no event on channel")?;
    ensure!(received == event, "event altered in transit: {:?}", received);

    subscription.unsubscribe();
    ensure!(feed.send(state_sync_event(2)) == 0, "delivered after unsubscribe");
    ensure!(rx.try_recv().is_err(), "channel received after unsubscribe");
    Ok(())
}

/// Root hash behaviour is fixed by the variant: either the provider's value
/// or a structural error, never anything in between.
pub fn check_root_hash_contract(
    backend: &dyn BorApiBackend,
    start: u64,
    end: u64,
    expected: &std::result::Result<String, BackendError>,
) -> Result<()> {
    let actual = backend.get_root_hash(&QueryContext::new(), start, end);
    ensure!(
        &actual == expected,
        "get_root_hash({}, {}) = {:?}, expected {:?}",
        start,
        end,
        actual,
        expected
    );
    Ok(())
}

/// A persisted receipt is returned whole and its logs are returned in
/// stored order.
pub fn check_present_receipt(
    backend: &dyn BorReceiptApi,
    block_hash: Hash,
    stored: &SideChainReceipt,
) -> Result<()> {
    let ctx = QueryContext::new();

    let receipt = backend
        .get_bor_block_receipt(&ctx, block_hash)
        .context("stored receipt not found")?;
    ensure!(&receipt == stored, "receipt differs from stored");

    let logs = backend.get_bor_block_logs(&ctx, block_hash)?;
    ensure!(logs == stored.logs, "logs differ from stored receipt");
    Ok(())
}

/// Absent receipt: the receipt lookup fails, the log lookup succeeds empty,
/// and the transaction lookup succeeds zero-valued.
pub fn check_absent_hash(backend: &dyn BorReceiptApi, hash: Hash) -> Result<()> {
    let ctx = QueryContext::new();

    match backend.get_bor_block_receipt(&ctx, hash) {
        Err(BackendError::NotFound { hash: h, .. }) if h == hash => {}
        other => anyhow::bail!("expected NotFound, got {:?}", other),
    }

    let logs = backend.get_bor_block_logs(&ctx, hash)?;
    ensure!(logs.is_empty(), "logs for absent receipt: {:?}", logs);

    let lookup = backend.get_bor_block_transaction(&ctx, hash)?;
    ensure!(lookup.transaction.is_none(), "transaction for absent hash");
    ensure!(lookup.block_hash == ZERO_HASH, "non-zero block hash");
    ensure!(lookup.block_number == 0, "non-zero block number");
    ensure!(lookup.index == 0, "non-zero index");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::{FullNodeFixture, LightNodeFixture, FIXTURE_ROOT_HASH};
    use bor_api_backend::test_utils::FailingRootHashProvider;
    use bor_api_backend::{CapabilityError, CapabilityRegistry, RootHashError, BOR_NAMESPACE};
    use proptest::prelude::*;
    use shared_types::BlockRange;
    use std::sync::Arc;

    // =========================================================================
    // SHARED CONTRACT
    // =========================================================================

    #[test]
    fn test_full_node_subscription_lifecycle() {
        let fixture = FullNodeFixture::new();
        check_subscription_lifecycle(fixture.api(), &fixture.feed).unwrap();
    }

    #[test]
    fn test_light_node_subscription_lifecycle() {
        let fixture = LightNodeFixture::new();
        check_subscription_lifecycle(fixture.api(), &fixture.feed).unwrap();
    }

    #[test]
    fn test_full_node_root_hash_from_provider() {
        let fixture = FullNodeFixture::new();
        check_root_hash_contract(fixture.api(), 1, 1024, &Ok(FIXTURE_ROOT_HASH.into())).unwrap();

        let provider = fixture.root_provider.as_ref().unwrap();
        assert_eq!(provider.calls(), vec![BlockRange::new(1, 1024)]);
    }

    #[test]
    fn test_full_node_without_bor_module() {
        let fixture = FullNodeFixture::without_bor_module();
        check_root_hash_contract(fixture.api(), 1, 2, &Err(BackendError::EngineUnavailable))
            .unwrap();
    }

    #[test]
    fn test_full_node_upstream_error_unchanged() {
        let failure = RootHashError::RangeTooLong {
            len: 100_000,
            max: 65_536,
        };
        let mut registry = CapabilityRegistry::new();
        registry
            .register(
                BOR_NAMESPACE,
                "1.0",
                Arc::new(FailingRootHashProvider::new(failure.clone())),
            )
            .unwrap();
        let fixture = FullNodeFixture::with_registry(registry, None);

        check_root_hash_contract(
            fixture.api(),
            0,
            99_999,
            &Err(BackendError::Upstream(failure)),
        )
        .unwrap();
    }

    #[test]
    fn test_duplicate_namespace_keeps_first_provider() {
        let first = Arc::new(bor_api_backend::test_utils::MockRootHashProvider::new("0x01"));
        let second = Arc::new(bor_api_backend::test_utils::MockRootHashProvider::new("0x02"));
        let mut registry = CapabilityRegistry::new();
        registry
            .register(BOR_NAMESPACE, "1.0", first.clone())
            .unwrap();
        assert_eq!(
            registry.register(BOR_NAMESPACE, "2.0", second),
            Err(CapabilityError::DuplicateNamespace {
                namespace: BOR_NAMESPACE.into()
            })
        );

        let fixture = FullNodeFixture::with_registry(registry, Some(first));
        check_root_hash_contract(fixture.api(), 5, 6, &Ok("0x01".into())).unwrap();
    }

    // =========================================================================
    // RECEIPTS (FULL NODE ONLY)
    // =========================================================================

    #[test]
    fn test_receipt_with_many_logs() {
        let fixture = FullNodeFixture::new();
        let written = fixture.writer.write_bor_block_with_logs(1_000, [0x42; 32], 16);
        check_present_receipt(fixture.receipts(), [0x42; 32], &written.receipt).unwrap();
    }

    #[test]
    fn test_receipt_with_no_logs_is_not_absent() {
        let fixture = FullNodeFixture::new();
        let written = fixture.writer.write_bor_block(7, [0x07; 32], vec![], 0);

        check_present_receipt(fixture.receipts(), [0x07; 32], &written.receipt).unwrap();
    }

    #[test]
    fn test_transaction_found_by_derived_hash() {
        let fixture = FullNodeFixture::new();
        let written = fixture.writer.write_bor_block(64, [0x64; 32], vec![], 5);

        let lookup = fixture
            .receipts()
            .get_bor_block_transaction(&QueryContext::new(), written.transaction.hash)
            .unwrap();
        assert!(lookup.is_found());
        assert_eq!(lookup.block_hash, [0x64; 32]);
        assert_eq!(lookup.block_number, 64);
        assert_eq!(lookup.index, 5);
    }

    #[test]
    fn test_light_node_has_no_receipt_api() {
        let fixture = LightNodeFixture::new();
        assert!(fixture.handle.receipts().is_none());
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    proptest! {
        #[test]
        fn prop_persisted_receipt_round_trips(
            hash in any::<[u8; 32]>(),
            number in any::<u64>(),
            log_count in 0u64..12,
        ) {
            let fixture = FullNodeFixture::new();
            let written = fixture.writer.write_bor_block_with_logs(number, hash, log_count);
            prop_assert!(check_present_receipt(fixture.receipts(), hash, &written.receipt).is_ok());
        }

        #[test]
        fn prop_absent_hash_asymmetry(
            stored in any::<[u8; 32]>(),
            queried in any::<[u8; 32]>(),
        ) {
            prop_assume!(stored != queried);
            let fixture = FullNodeFixture::new();
            let written = fixture.writer.write_bor_block_with_logs(1, stored, 2);
            prop_assume!(written.transaction.hash != queried);

            let result = check_absent_hash(fixture.receipts(), queried);
            prop_assert!(result.is_ok(), "{:?}", result);
        }

        #[test]
        fn prop_light_root_hash_never_implemented(start in any::<u64>(), end in any::<u64>()) {
            let fixture = LightNodeFixture::new();
            let expected = Err(BackendError::NotImplemented { operation: "get_root_hash" });
            prop_assert!(check_root_hash_contract(fixture.api(), start, end, &expected).is_ok());
        }

        #[test]
        fn prop_full_root_hash_is_verbatim(start in any::<u64>(), end in any::<u64>()) {
            let fixture = FullNodeFixture::new();
            let expected = Ok(FIXTURE_ROOT_HASH.to_string());
            prop_assert!(check_root_hash_contract(fixture.api(), start, end, &expected).is_ok());
        }
    }
}
