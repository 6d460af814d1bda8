//! # JSON-RPC Flows
//!
//! Requests as an upstream RPC server would issue them, against both node
//! variants.

#[cfg(test)]
mod tests {
    use crate::support::{FullNodeFixture, LightNodeFixture, FIXTURE_ROOT_HASH};
    use bor_api_backend::rpc::{
        codes, RpcDispatcher, BOR_GET_ROOT_HASH, ETH_GET_BOR_BLOCK_LOGS,
        ETH_GET_BOR_BLOCK_RECEIPT, ETH_GET_BOR_BLOCK_TRANSACTION,
    };
    use serde_json::{json, Value};
    use shared_types::{hash_to_hex, QueryContext};

    fn hash(bytes: [u8; 32]) -> Value {
        json!(hash_to_hex(&bytes))
    }

    #[test]
    fn test_full_node_serves_every_method() {
        let fixture = FullNodeFixture::new();
        let written = fixture.writer.write_bor_block_with_logs(0x1f, [0xb1; 32], 2);
        let rpc = RpcDispatcher::new(&fixture.handle);
        let ctx = QueryContext::new();

        let root = rpc
            .dispatch(&ctx, BOR_GET_ROOT_HASH, &json!(["0x1", "0x400"]))
            .unwrap();
        assert_eq!(root, json!(FIXTURE_ROOT_HASH));

        let receipt = rpc
            .dispatch(&ctx, ETH_GET_BOR_BLOCK_RECEIPT, &json!([hash([0xb1; 32])]))
            .unwrap();
        assert_eq!(receipt["blockHash"], hash([0xb1; 32]));
        assert_eq!(receipt["transactionHash"], hash(written.transaction.hash));
        assert_eq!(receipt["status"], "0x1");

        let logs = rpc
            .dispatch(&ctx, ETH_GET_BOR_BLOCK_LOGS, &json!([hash([0xb1; 32])]))
            .unwrap();
        assert_eq!(logs[0]["logIndex"], "0x0");
        assert_eq!(logs[1]["logIndex"], "0x1");

        let tx = rpc
            .dispatch(
                &ctx,
                ETH_GET_BOR_BLOCK_TRANSACTION,
                &json!([hash(written.transaction.hash)]),
            )
            .unwrap();
        assert_eq!(tx["blockNumber"], "0x1f");
        assert_eq!(tx["hash"], hash(written.transaction.hash));
    }

    #[test]
    fn test_topic_filter_on_logs() {
        let fixture = FullNodeFixture::new();
        fixture.writer.write_bor_block_with_logs(3, [0xc3; 32], 4);
        let rpc = RpcDispatcher::new(&fixture.handle);

        let params = json!([hash([0xc3; 32]), {"topics": [[hash([2; 32]), hash([3; 32])]]}]);
        let logs = rpc
            .dispatch(&QueryContext::new(), ETH_GET_BOR_BLOCK_LOGS, &params)
            .unwrap();
        let indexes: Vec<&str> = logs
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["logIndex"].as_str().unwrap())
            .collect();
        assert_eq!(indexes, vec!["0x2", "0x3"]);
    }

    #[test]
    fn test_error_codes_by_variant() {
        let full = FullNodeFixture::without_bor_module();
        let light = LightNodeFixture::new();
        let full_rpc = RpcDispatcher::new(&full.handle);
        let light_rpc = RpcDispatcher::new(&light.handle);
        let ctx = QueryContext::new();

        let cases = [
            (&full_rpc, BOR_GET_ROOT_HASH, json!([1, 2]), codes::RESOURCE_UNAVAILABLE),
            (&light_rpc, BOR_GET_ROOT_HASH, json!([1, 2]), codes::METHOD_NOT_SUPPORTED),
            (&light_rpc, ETH_GET_BOR_BLOCK_LOGS, json!([hash([1; 32])]), codes::METHOD_NOT_SUPPORTED),
            (&full_rpc, ETH_GET_BOR_BLOCK_RECEIPT, json!([hash([1; 32])]), codes::RESOURCE_NOT_FOUND),
            (&full_rpc, ETH_GET_BOR_BLOCK_RECEIPT, json!(["0x1234"]), codes::INVALID_PARAMS),
            (&full_rpc, "eth_getBlockByHash", json!([]), codes::METHOD_NOT_FOUND),
        ];

        for (rpc, method, params, code) in cases {
            let err = rpc.dispatch(&ctx, method, &params).unwrap_err();
            assert_eq!(err.code, code, "{} {}", method, params);
        }
    }

    #[test]
    fn test_cancelled_request_never_reaches_engine() {
        let fixture = FullNodeFixture::new();
        let rpc = RpcDispatcher::new(&fixture.handle);
        let ctx = QueryContext::new();
        ctx.clone().cancel();

        let err = rpc
            .dispatch(&ctx, BOR_GET_ROOT_HASH, &json!([1, 2]))
            .unwrap_err();
        assert_eq!(err.code, codes::REQUEST_CANCELLED);
        assert!(fixture.root_provider.unwrap().calls().is_empty());
    }
}
