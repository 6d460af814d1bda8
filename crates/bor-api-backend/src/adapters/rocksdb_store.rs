//! # RocksDB Chain Database Adapter
//!
//! Production [`KeyValueStore`] over the node's chain database.
//!
//! The backend only reads. When the database is shared with a running node
//! open it with `read_only = true`; a writable handle is for fixtures and
//! tooling that seed a fresh directory.

use crate::config::StorageConfig;
use crate::ports::KeyValueStore;
use rocksdb::{Options, DB};
use shared_types::KVStoreError;
use tracing::info;

/// RocksDB-backed key-value store.
pub struct RocksDbStore {
    db: DB,
    read_only: bool,
}

impl RocksDbStore {
    /// Open the database at `config.data_dir`.
    pub fn open(config: &StorageConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        opts.set_block_based_table_factory(&block_opts);

        let db = if config.read_only {
            DB::open_for_read_only(&opts, &config.data_dir, false)
        } else {
            opts.create_if_missing(true);
            DB::open(&opts, &config.data_dir)
        }
        .map_err(|e| KVStoreError::IOError {
            message: format!("Failed to open RocksDB: {}", e),
        })?;

        info!(
            path = %config.data_dir.display(),
            read_only = config.read_only,
            "Opened chain database"
        );

        Ok(Self {
            db,
            read_only: config.read_only,
        })
    }

    /// Write a key. Fails on a read-only handle.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        if self.read_only {
            return Err(KVStoreError::ReadOnly);
        }
        self.db.put(key, value).map_err(|e| KVStoreError::IOError {
            message: format!("RocksDB put failed: {}", e),
        })
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| KVStoreError::IOError {
            message: format!("RocksDB get failed: {}", e),
        })
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.db
            .get_pinned(key)
            .map(|v| v.is_some())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB exists check failed: {}", e),
            })
    }
}
