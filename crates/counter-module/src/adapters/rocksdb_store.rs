//! # RocksDB Storage Adapter
//!
//! Production [`KeyValueStore`] backed by RocksDB (feature `rocksdb`).
//!
//! ## Features
//!
//! - Atomic batch writes (WriteBatch)
//! - Module state isolated in its own column family
//! - Snappy compression and bloom filters
//! - Optional fsync on every write

use crate::domain::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, KvIter, Order};
use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamily, ColumnFamilyDescriptor, DBCompressionType, Direction,
    IteratorMode, Options, WriteBatch, WriteOptions, DB,
};
use tracing::info;

/// Default column family for counter module state.
pub const CF_COUNTER: &str = "counter";

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Column family holding module state
    pub column_family: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3)
    pub max_write_buffer_number: i32,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/counter".to_string(),
            column_family: CF_COUNTER.to_string(),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            max_write_buffer_number: 3,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            max_write_buffer_number: 2,
            sync_writes: false,
            ..Default::default()
        }
    }
}

/// RocksDB-backed key-value store
pub struct RocksDbStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create the database and its column family.
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_compression_type(DBCompressionType::Snappy);

        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let mut cf_opts = Options::default();
        cf_opts.set_compression_type(DBCompressionType::Snappy);
        let cf = ColumnFamilyDescriptor::new(config.column_family.as_str(), cf_opts);

        let db = DB::open_cf_descriptors(&opts, &config.path, vec![cf]).map_err(|e| {
            KVStoreError::IOError {
                message: format!("Failed to open RocksDB: {}", e),
            }
        })?;

        info!(
            "[counter] 💾 Opened RocksDB at {} (cf: {})",
            config.path, config.column_family
        );
        Ok(Self { db, config })
    }

    fn cf(&self) -> Result<&ColumnFamily, KVStoreError> {
        self.db
            .cf_handle(&self.config.column_family)
            .ok_or_else(|| KVStoreError::Corruption {
                message: format!("missing column family {}", self.config.column_family),
            })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db
            .get_cf(self.cf()?, key)
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB get failed: {}", e),
            })
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .put_cf_opt(self.cf()?, key, value, &self.write_options())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB put failed: {}", e),
            })
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .delete_cf_opt(self.cf()?, key, &self.write_options())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB delete failed: {}", e),
            })
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let cf = self.cf()?;
        let mut batch = WriteBatch::default();

        for op in operations {
            match op {
                BatchOperation::Put { key, value } => batch.put_cf(cf, &key, &value),
                BatchOperation::Delete { key } => batch.delete_cf(cf, &key),
            }
        }

        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB batch write failed: {}", e),
            })
    }

    fn range<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Result<KvIter<'a>, KVStoreError> {
        let cf = self.cf()?;
        let start = start.map(<[u8]>::to_vec);
        let end = end.map(<[u8]>::to_vec);

        let mode = match (order, &start, &end) {
            (Order::Ascending, Some(s), _) => IteratorMode::From(s.as_slice(), Direction::Forward),
            (Order::Ascending, None, _) => IteratorMode::Start,
            // Reverse seek lands on the last key <= end; `end` itself is skipped below.
            (Order::Descending, _, Some(e)) => IteratorMode::From(e.as_slice(), Direction::Reverse),
            (Order::Descending, _, None) => IteratorMode::End,
        };
        let raw = self.db.iterator_cf(cf, mode);
        let exclusive_end = end.clone();

        let iter = raw
            .map(|item| {
                item.map(|(k, v)| (k.to_vec(), v.to_vec()))
                    .map_err(|e| KVStoreError::IOError {
                        message: format!("RocksDB scan failed: {}", e),
                    })
            })
            .filter(move |item| match (order, item, &exclusive_end) {
                (Order::Descending, Ok((k, _)), Some(e)) => k < e,
                _ => true,
            })
            .take_while(move |item| match item {
                Ok((k, _)) => match order {
                    Order::Ascending => end.as_ref().map_or(true, |e| k < e),
                    Order::Descending => start.as_ref().map_or(true, |s| k >= s),
                },
                Err(_) => true,
            });

        Ok(Box::new(iter))
    }
}
