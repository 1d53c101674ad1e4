//! Concrete implementations of the outbound ports.

pub mod address;
pub mod cache_store;
pub mod file_store;
pub mod memory_store;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;

pub use address::HexAddressCodec;
pub use cache_store::CacheStore;
pub use file_store::{FileBackedKVStore, FileStoreConfig};
pub use memory_store::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbConfig, RocksDbStore, CF_COUNTER};
