//! # Bor Receipt Store
//!
//! Read path over the chain database for side-chain receipts and
//! transactions.
//!
//! ## Key Schema
//!
//! | Key | Value |
//! |-----|-------|
//! | `H` + block hash | block number (8 bytes, big endian) |
//! | `h` + number + `n` | canonical block hash |
//! | `matic-bor-receipt-` + number + block hash | bincode `SideChainReceipt` |
//! | `matic-bor-tx-lookup-` + tx hash | block number (8 bytes, big endian) |
//! | `matic-bor-tx-body-` + tx hash | bincode `SideChainTransaction` |
//!
//! Faults (I/O errors, undecodable records) are logged and reported as
//! absence. The read path has no failure mode of its own.

use crate::ports::{KeyValueStore, ReceiptStore};
use sha3::{Digest, Keccak256};
use shared_types::{
    short_hex, BorTransactionLookup, Hash, RecordError, SideChainReceipt, SideChainTransaction,
    ZERO_HASH,
};
use std::sync::Arc;
use tracing::{debug, error};

pub const HEADER_NUMBER_PREFIX: &[u8] = b"H";
pub const HEADER_PREFIX: &[u8] = b"h";
pub const HEADER_HASH_SUFFIX: &[u8] = b"n";
pub const BOR_RECEIPT_PREFIX: &[u8] = b"matic-bor-receipt-";
pub const BOR_TX_LOOKUP_PREFIX: &[u8] = b"matic-bor-tx-lookup-";
pub const BOR_TX_BODY_PREFIX: &[u8] = b"matic-bor-tx-body-";

/// `H` + hash -> number
pub fn header_number_key(block_hash: &Hash) -> Vec<u8> {
    [HEADER_NUMBER_PREFIX, block_hash.as_slice()].concat()
}

/// `h` + number + `n` -> canonical hash
pub fn canonical_hash_key(number: u64) -> Vec<u8> {
    [HEADER_PREFIX, &number.to_be_bytes(), HEADER_HASH_SUFFIX].concat()
}

/// `matic-bor-receipt-` + number + hash -> receipt
pub fn bor_receipt_key(number: u64, block_hash: &Hash) -> Vec<u8> {
    [BOR_RECEIPT_PREFIX, &number.to_be_bytes(), block_hash.as_slice()].concat()
}

/// `matic-bor-tx-lookup-` + tx hash -> number
pub fn bor_tx_lookup_key(tx_hash: &Hash) -> Vec<u8> {
    [BOR_TX_LOOKUP_PREFIX, tx_hash.as_slice()].concat()
}

/// `matic-bor-tx-body-` + tx hash -> transaction
pub fn bor_tx_body_key(tx_hash: &Hash) -> Vec<u8> {
    [BOR_TX_BODY_PREFIX, tx_hash.as_slice()].concat()
}

/// Hash of the synthetic state-sync transaction of a block: keccak256 of the
/// block's bor receipt key.
pub fn derive_bor_tx_hash(number: u64, block_hash: &Hash) -> Hash {
    Keccak256::digest(bor_receipt_key(number, block_hash)).into()
}

fn decode_number(kind: &'static str, bytes: &[u8]) -> Result<u64, RecordError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| RecordError::InvalidLength {
        kind,
        expected: 8,
        got: bytes.len(),
    })?;
    Ok(u64::from_be_bytes(raw))
}

fn decode_record<T: serde::de::DeserializeOwned>(
    kind: &'static str,
    bytes: &[u8],
) -> Result<T, RecordError> {
    bincode::deserialize(bytes).map_err(|e| RecordError::Corrupt {
        kind,
        message: e.to_string(),
    })
}

/// Receipt store accessor over a key-value database.
pub struct KvReceiptStore {
    db: Arc<dyn KeyValueStore>,
}

impl KvReceiptStore {
    pub fn new(db: Arc<dyn KeyValueStore>) -> Self {
        Self { db }
    }

    /// Block number for a header hash.
    pub fn read_header_number(&self, block_hash: &Hash) -> Result<Option<u64>, RecordError> {
        self.db
            .get(&header_number_key(block_hash))?
            .map(|bytes| decode_number("block number", &bytes))
            .transpose()
    }

    /// Canonical block hash at `number`.
    pub fn read_canonical_hash(&self, number: u64) -> Result<Option<Hash>, RecordError> {
        let Some(bytes) = self.db.get(&canonical_hash_key(number))? else {
            return Ok(None);
        };
        let hash: Hash = bytes
            .as_slice()
            .try_into()
            .map_err(|_| RecordError::InvalidLength {
                kind: "canonical hash",
                expected: 32,
                got: bytes.len(),
            })?;
        Ok(Some(hash))
    }

    /// Bor receipt stored for `(number, block_hash)`.
    pub fn read_bor_receipt(
        &self,
        block_hash: &Hash,
        number: u64,
    ) -> Result<Option<SideChainReceipt>, RecordError> {
        self.db
            .get(&bor_receipt_key(number, block_hash))?
            .map(|bytes| decode_record("bor receipt", &bytes))
            .transpose()
    }

    /// Block number recorded for a state-sync transaction.
    pub fn read_bor_tx_lookup(&self, tx_hash: &Hash) -> Result<Option<u64>, RecordError> {
        self.db
            .get(&bor_tx_lookup_key(tx_hash))?
            .map(|bytes| decode_number("bor tx lookup", &bytes))
            .transpose()
    }

    /// Body of a state-sync transaction.
    pub fn read_bor_tx_body(
        &self,
        tx_hash: &Hash,
    ) -> Result<Option<SideChainTransaction>, RecordError> {
        self.db
            .get(&bor_tx_body_key(tx_hash))?
            .map(|bytes| decode_record("bor transaction", &bytes))
            .transpose()
    }

    fn try_receipt_by_hash(
        &self,
        block_hash: &Hash,
    ) -> Result<Option<SideChainReceipt>, RecordError> {
        let Some(number) = self.read_header_number(block_hash)? else {
            return Ok(None);
        };
        self.read_bor_receipt(block_hash, number)
    }

    fn try_transaction_by_hash(
        &self,
        tx_hash: &Hash,
    ) -> Result<Option<BorTransactionLookup>, RecordError> {
        let Some(number) = self.read_bor_tx_lookup(tx_hash)? else {
            return Ok(None);
        };
        let block_hash = match self.read_canonical_hash(number)? {
            Some(hash) if hash != ZERO_HASH => hash,
            _ => return Ok(None),
        };
        let Some(receipt) = self.read_bor_receipt(&block_hash, number)? else {
            error!(
                tx = %short_hex(tx_hash),
                number,
                "Bor transaction referenced missing receipt"
            );
            return Ok(None);
        };
        let Some(transaction) = self.read_bor_tx_body(tx_hash)? else {
            error!(
                tx = %short_hex(tx_hash),
                number,
                "Bor transaction referenced missing body"
            );
            return Ok(None);
        };

        Ok(Some(BorTransactionLookup {
            transaction: Some(transaction),
            block_hash,
            block_number: number,
            index: receipt.transaction_index,
        }))
    }
}

impl ReceiptStore for KvReceiptStore {
    fn receipt_by_hash(&self, block_hash: &Hash) -> Option<SideChainReceipt> {
        match self.try_receipt_by_hash(block_hash) {
            Ok(receipt) => {
                debug!(
                    block = %short_hex(block_hash),
                    found = receipt.is_some(),
                    "Read bor receipt"
                );
                receipt
            }
            Err(e) => {
                error!(block = %short_hex(block_hash), error = %e, "Failed to read bor receipt");
                None
            }
        }
    }

    fn transaction_by_hash(&self, tx_hash: &Hash) -> Option<BorTransactionLookup> {
        match self.try_transaction_by_hash(tx_hash) {
            Ok(lookup) => {
                debug!(
                    tx = %short_hex(tx_hash),
                    found = lookup.is_some(),
                    "Read bor transaction"
                );
                lookup
            }
            Err(e) => {
                error!(tx = %short_hex(tx_hash), error = %e, "Failed to read bor transaction");
                None
            }
        }
    }
}
