//! # JSON-RPC Dispatch
//!
//! Routes Bor JSON-RPC methods to the backend.
//!
//! | Method | Handler | Light node |
//! |--------|---------|------------|
//! | `bor_getRootHash` | [`BorRpc`] | `-32004` |
//! | `eth_getBorBlockReceipt` | [`BorChainRpc`] | `-32004` |
//! | `eth_getBorBlockLogs` | [`BorChainRpc`] | `-32004` |
//! | `eth_getBorBlockTransaction` | [`BorChainRpc`] | `-32004` |
//!
//! A cancelled [`QueryContext`] is rejected before the backend is called.
//! Once a call is issued it runs to completion.

pub mod bor;
pub mod error;
pub mod eth;
pub mod types;

pub use bor::BorRpc;
pub use error::{codes, ApiError, ApiResult};
pub use eth::BorChainRpc;
pub use types::*;

use crate::application::Backend;
use primitive_types::H256;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::QueryContext;
use tracing::{debug, instrument};

pub const BOR_GET_ROOT_HASH: &str = "bor_getRootHash";
pub const ETH_GET_BOR_BLOCK_RECEIPT: &str = "eth_getBorBlockReceipt";
pub const ETH_GET_BOR_BLOCK_LOGS: &str = "eth_getBorBlockLogs";
pub const ETH_GET_BOR_BLOCK_TRANSACTION: &str = "eth_getBorBlockTransaction";

/// Every method this module knows about.
pub const BOR_METHODS: &[&str] = &[
    BOR_GET_ROOT_HASH,
    ETH_GET_BOR_BLOCK_RECEIPT,
    ETH_GET_BOR_BLOCK_LOGS,
    ETH_GET_BOR_BLOCK_TRANSACTION,
];

/// Method router over one backend.
pub struct RpcDispatcher {
    bor: BorRpc,
    chain: Option<BorChainRpc>,
}

impl RpcDispatcher {
    pub fn new(backend: &Backend) -> Self {
        Self {
            bor: BorRpc::new(backend.api().clone()),
            chain: backend.receipts().cloned().map(BorChainRpc::new),
        }
    }

    /// Methods routed to a handler on this backend.
    pub fn supported_methods(&self) -> Vec<&'static str> {
        match self.chain {
            Some(_) => BOR_METHODS.to_vec(),
            None => vec![BOR_GET_ROOT_HASH],
        }
    }

    /// Dispatch one call. `params` is the JSON-RPC positional params array
    /// (or `null`).
    #[instrument(skip(self, ctx, params), fields(correlation_id = %ctx.correlation_id()))]
    pub fn dispatch(&self, ctx: &QueryContext, method: &str, params: &Value) -> ApiResult<Value> {
        if !BOR_METHODS.contains(&method) {
            return Err(ApiError::method_not_found(method));
        }
        if ctx.is_cancelled() {
            debug!(method, "Dropping cancelled request");
            return Err(ApiError::cancelled(method));
        }

        let params = Params::new(params)?;
        let result = match method {
            BOR_GET_ROOT_HASH => {
                let start: BlockNumberParam = params.required(0, "start")?;
                let end: BlockNumberParam = params.required(1, "end")?;
                to_value(self.bor.get_root_hash(ctx, start.0, end.0)?)?
            }
            _ => {
                let chain = self
                    .chain
                    .as_ref()
                    .ok_or_else(|| ApiError::method_not_supported(method))?;
                let hash: H256 = params.required(0, "hash")?;
                match method {
                    ETH_GET_BOR_BLOCK_RECEIPT => to_value(chain.get_bor_block_receipt(ctx, hash)?)?,
                    ETH_GET_BOR_BLOCK_LOGS => {
                        let filter: Option<RpcLogFilter> = params.optional(1, "filter")?;
                        to_value(chain.get_bor_block_logs(ctx, hash, filter.map(Into::into))?)?
                    }
                    _ => to_value(chain.get_bor_block_transaction(ctx, hash)?)?,
                }
            }
        };
        Ok(result)
    }
}

fn to_value<T: serde::Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Positional parameter reader.
struct Params<'a> {
    items: &'a [Value],
}

impl<'a> Params<'a> {
    fn new(params: &'a Value) -> ApiResult<Self> {
        match params {
            Value::Null => Ok(Self { items: &[] }),
            Value::Array(items) => Ok(Self { items }),
            _ => Err(ApiError::invalid_params("params must be an array")),
        }
    }

    fn required<T: DeserializeOwned>(&self, index: usize, name: &str) -> ApiResult<T> {
        self.optional(index, name)?
            .ok_or_else(|| ApiError::invalid_params(format!("missing {} (position {})", name, index)))
    }

    fn optional<T: DeserializeOwned>(&self, index: usize, name: &str) -> ApiResult<Option<T>> {
        match self.items.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ApiError::invalid_params(format!("{}: {}", name, e))),
        }
    }
}
