//! JSON views of bor artifacts and request parameter types.
//!
//! Hashes, addresses and quantities serialize as `0x`-prefixed hex, as
//! Ethereum JSON-RPC clients expect.

use crate::domain::LogFilter;
use primitive_types::{H160, H256, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use shared_types::{BorTransactionLookup, SideChainLog, SideChainReceipt, SideChainTransaction};
use std::fmt;

/// Byte string with hex serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s)
            .map(Bytes)
            .map_err(|_| de::Error::custom("invalid hex bytes"))
    }
}

/// Block number parameter: JSON number, `0x` hex or decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockNumberParam(pub u64);

impl<'de> Deserialize<'de> for BlockNumberParam {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BlockNumberVisitor;

        impl<'de> de::Visitor<'de> for BlockNumberVisitor {
            type Value = BlockNumberParam;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a block number as integer or hex string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(BlockNumberParam(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map(BlockNumberParam)
                    .map_err(|_| E::custom("negative block number"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                let parsed = match value
                    .strip_prefix("0x")
                    .or_else(|| value.strip_prefix("0X"))
                {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => value.parse(),
                };
                parsed
                    .map(BlockNumberParam)
                    .map_err(|_| E::custom(format!("invalid block number: {}", value)))
            }
        }

        deserializer.deserialize_any(BlockNumberVisitor)
    }
}

/// Log filter address: single or multiple.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterAddress {
    Single(H160),
    Multiple(Vec<H160>),
}

/// Log filter topic: single or alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterTopic {
    Single(H256),
    Multiple(Vec<H256>),
}

/// Optional filter accepted by `eth_getBorBlockLogs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcLogFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FilterAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Option<FilterTopic>>>,
}

impl From<RpcLogFilter> for LogFilter {
    fn from(filter: RpcLogFilter) -> Self {
        let addresses = match filter.address {
            None => Vec::new(),
            Some(FilterAddress::Single(a)) => vec![a.0],
            Some(FilterAddress::Multiple(list)) => list.into_iter().map(|a| a.0).collect(),
        };
        let topics = filter
            .topics
            .unwrap_or_default()
            .into_iter()
            .map(|position| {
                position.map(|topic| match topic {
                    FilterTopic::Single(t) => vec![t.0],
                    FilterTopic::Multiple(list) => list.into_iter().map(|t| t.0).collect(),
                })
            })
            .collect();
        LogFilter { addresses, topics }
    }
}

/// Log as returned over JSON-RPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    pub address: H160,
    pub topics: Vec<H256>,
    pub data: Bytes,
    pub block_number: U256,
    pub transaction_hash: H256,
    pub transaction_index: U256,
    pub block_hash: H256,
    pub log_index: U256,
    pub removed: bool,
}

impl From<SideChainLog> for RpcLog {
    fn from(log: SideChainLog) -> Self {
        Self {
            address: H160(log.address),
            topics: log.topics.into_iter().map(H256).collect(),
            data: Bytes(log.data),
            block_number: log.block_number.into(),
            transaction_hash: H256(log.tx_hash),
            transaction_index: log.tx_index.into(),
            block_hash: H256(log.block_hash),
            log_index: log.log_index.into(),
            removed: log.removed,
        }
    }
}

/// Bor receipt as returned over JSON-RPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub status: U256,
    pub cumulative_gas_used: U256,
    pub logs: Vec<RpcLog>,
    pub transaction_hash: H256,
    pub block_hash: H256,
    pub block_number: U256,
    pub transaction_index: U256,
}

impl From<SideChainReceipt> for RpcReceipt {
    fn from(receipt: SideChainReceipt) -> Self {
        Self {
            status: receipt.status.into(),
            cumulative_gas_used: receipt.cumulative_gas_used.into(),
            logs: receipt.logs.into_iter().map(RpcLog::from).collect(),
            transaction_hash: H256(receipt.tx_hash),
            block_hash: H256(receipt.block_hash),
            block_number: receipt.block_number.into(),
            transaction_index: receipt.transaction_index.into(),
        }
    }
}

/// State-sync transaction with its position, as returned over JSON-RPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub hash: H256,
    pub nonce: U256,
    pub block_hash: H256,
    pub block_number: U256,
    pub transaction_index: U256,
    pub from: H160,
    pub to: Option<H160>,
    pub value: U256,
    pub gas: U256,
    pub gas_price: U256,
    pub input: Bytes,
}

impl RpcTransaction {
    fn new(tx: SideChainTransaction, block_hash: H256, block_number: u64, index: u64) -> Self {
        Self {
            hash: H256(tx.hash),
            nonce: tx.nonce.into(),
            block_hash,
            block_number: block_number.into(),
            transaction_index: index.into(),
            from: H160(tx.from),
            to: tx.to.map(H160),
            value: tx.value,
            gas: tx.gas.into(),
            gas_price: tx.gas_price,
            input: Bytes(tx.input),
        }
    }

    /// `None` when the lookup found nothing; absence renders as JSON `null`.
    pub fn from_lookup(lookup: BorTransactionLookup) -> Option<Self> {
        let BorTransactionLookup {
            transaction,
            block_hash,
            block_number,
            index,
        } = lookup;
        transaction.map(|tx| Self::new(tx, H256(block_hash), block_number, index))
    }
}
