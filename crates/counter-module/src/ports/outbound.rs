//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the counter module requires the host to provide:
//!
//! - [`KeyValueStore`]: ordered, durable byte-keyed storage
//! - [`AddressCodec`]: textual address <-> canonical bytes
//!
//! Implementations live in `adapters/`.

use crate::domain::{AddressError, CanonicalAddress, KVStoreError};

/// A raw key-value pair.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Ordered iterator over a key range.
pub type KvIter<'a> = Box<dyn Iterator<Item = Result<KvPair, KVStoreError>> + 'a>;

/// Iteration direction over a key range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// Abstract interface for ordered key-value storage.
///
/// Keys are compared lexicographically as bytes. Readers take `&self`,
/// writers `&mut self`, so a query holding `&S` observes one immutable
/// snapshot for as long as it holds the borrow.
///
/// Production: `RocksDbStore` (feature `rocksdb`) or `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Iterate keys in `[start, end)`. `None` leaves that side unbounded.
    fn range<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Result<KvIter<'a>, KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }

    pub fn key(&self) -> &[u8] {
        match self {
            BatchOperation::Put { key, .. } | BatchOperation::Delete { key } => key,
        }
    }
}

/// Converts between textual addresses and their canonical bytes.
///
/// Decoding is the only address validation the module performs.
pub trait AddressCodec: Send + Sync {
    /// Decode and validate a textual address.
    fn string_to_bytes(&self, text: &str) -> Result<CanonicalAddress, AddressError>;

    /// Encode canonical bytes back to the canonical textual form.
    fn bytes_to_string(&self, bytes: &[u8]) -> Result<String, AddressError>;
}

/// Smallest key strictly greater than every key starting with `prefix`.
///
/// Returns `None` when no such key exists (prefix is empty or all `0xFF`).
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < 0xFF {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

/// Immediate successor of `key` in byte order.
pub fn key_successor(key: &[u8]) -> Vec<u8> {
    let mut next = Vec::with_capacity(key.len() + 1);
    next.extend_from_slice(key);
    next.push(0x00);
    next
}
