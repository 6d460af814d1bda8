//! # Side-Chain Entities
//!
//! Data produced by the state-sync bridge process and persisted next to (but
//! separately from) ordinary chain receipts.
//!
//! ## Clusters
//!
//! - **Primitives**: `Hash`, `Address`, `U256`
//! - **Bor Artifacts**: `SideChainReceipt`, `SideChainLog`, `SideChainTransaction`
//! - **Bridge Feed**: `StateSyncEvent`
//! - **Checkpointing**: `BlockRange`

use serde::{Deserialize, Serialize};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte hash (block hash, transaction hash, log topic).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// The all-zero hash, returned in place of an absent block hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Render a hash as `0x`-prefixed lowercase hex.
pub fn hash_to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Short form used in log lines: first four bytes only.
pub fn short_hex(bytes: &[u8]) -> String {
    let end = bytes.len().min(4);
    format!("0x{}..", hex::encode(&bytes[..end]))
}

// =============================================================================
// CHECKPOINTING
// =============================================================================

/// Inclusive block range a root hash is computed over.
///
/// No ordering invariant is enforced here; the consensus engine that computes
/// the root hash owns range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRange {
    /// First block of the range.
    pub start_block: u64,
    /// Last block of the range.
    pub end_block: u64,
}

impl BlockRange {
    /// Create a range without validating it.
    pub fn new(start_block: u64, end_block: u64) -> Self {
        Self {
            start_block,
            end_block,
        }
    }

    /// Number of blocks covered, or `None` if the range is inverted.
    pub fn len(&self) -> Option<u64> {
        self.end_block
            .checked_sub(self.start_block)
            .map(|d| d.saturating_add(1))
    }

    /// True when `end_block < start_block`.
    pub fn is_empty(&self) -> bool {
        self.len().is_none()
    }
}

// =============================================================================
// BOR ARTIFACTS
// =============================================================================

/// A log emitted while applying state-sync records at the end of a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideChainLog {
    /// Contract that emitted the log.
    pub address: Address,
    /// Indexed topics, topic 0 being the event signature.
    pub topics: Vec<Hash>,
    /// Non-indexed payload.
    pub data: Vec<u8>,
    /// Block the log was produced in.
    pub block_number: u64,
    /// Hash of the (derived) state-sync transaction.
    pub tx_hash: Hash,
    /// Position of that transaction in the block.
    pub tx_index: u64,
    /// Hash of the block the log belongs to.
    pub block_hash: Hash,
    /// Position of the log in the block.
    pub log_index: u64,
    /// Set when the log was reverted by a reorg.
    pub removed: bool,
}

/// Receipt for the state-sync transaction of a block.
///
/// Stored under its own key space, never mixed with the block's regular
/// receipts. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideChainReceipt {
    /// Execution status (1 = success).
    pub status: u64,
    /// Cumulative gas used in the block up to and including this receipt.
    pub cumulative_gas_used: u64,
    /// Logs in emission order.
    pub logs: Vec<SideChainLog>,
    /// Hash of the derived state-sync transaction.
    pub tx_hash: Hash,
    /// Hash of the containing block.
    pub block_hash: Hash,
    /// Number of the containing block.
    pub block_number: u64,
    /// Index of the state-sync transaction within the block.
    pub transaction_index: u64,
}

impl SideChainReceipt {
    /// Receipt status for successful execution.
    pub const STATUS_SUCCESSFUL: u64 = 1;

    /// True if the receipt records successful execution.
    pub fn is_successful(&self) -> bool {
        self.status == Self::STATUS_SUCCESSFUL
    }
}

/// The synthetic transaction bor derives for a block's state-sync receipt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideChainTransaction {
    /// Derived transaction hash.
    pub hash: Hash,
    /// Always zero for state-sync transactions.
    pub nonce: u64,
    /// System address the transaction is attributed to.
    pub from: Address,
    /// Recipient (`None` means contract creation, never the case here).
    pub to: Option<Address>,
    /// Transferred value.
    pub value: U256,
    /// Gas limit.
    pub gas: u64,
    /// Gas price.
    pub gas_price: U256,
    /// Call data.
    pub input: Vec<u8>,
}

/// Result of looking up a state-sync transaction by hash.
///
/// Absence is encoded as the default value: no transaction, zero block hash,
/// zero block number and zero index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorTransactionLookup {
    /// The transaction, if found.
    pub transaction: Option<SideChainTransaction>,
    /// Hash of the containing block.
    pub block_hash: Hash,
    /// Number of the containing block.
    pub block_number: u64,
    /// Index within the block.
    pub index: u64,
}

impl BorTransactionLookup {
    /// True if the lookup resolved a transaction.
    pub fn is_found(&self) -> bool {
        self.transaction.is_some()
    }
}

// =============================================================================
// BRIDGE FEED
// =============================================================================

/// A state-sync record observed on the root chain and replayed on the side
/// chain.
///
/// Relayed verbatim: the backend never inspects or rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateSyncEvent {
    /// Monotonic state-sync id assigned by the root-chain contract.
    pub id: u64,
    /// Receiver contract on the side chain.
    pub contract: Address,
    /// Encoded payload as emitted on the root chain.
    pub data: String,
    /// Root-chain transaction that emitted the record.
    pub tx_hash: Hash,
}
