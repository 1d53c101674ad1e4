use crate::domain::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, KvIter, KvPair, Order};
use std::collections::BTreeMap;
use std::ops::Bound;

/// In-memory key-value store for unit tests and simulation.
///
/// Ordered by key so range scans match the production backends.
#[derive(Default, Clone, Debug)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        apply_batch(&mut self.data, operations);
        Ok(())
    }

    fn range<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Result<KvIter<'a>, KVStoreError> {
        Ok(btree_range(&self.data, start, end, order))
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}

/// Apply a batch to an ordered map. Infallible, hence atomic.
pub(crate) fn apply_batch(data: &mut BTreeMap<Vec<u8>, Vec<u8>>, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                data.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                data.remove(&key);
            }
        }
    }
}

/// `[start, end)` scan over an ordered map.
pub(crate) fn btree_range<'a>(
    data: &'a BTreeMap<Vec<u8>, Vec<u8>>,
    start: Option<&[u8]>,
    end: Option<&[u8]>,
    order: Order,
) -> KvIter<'a> {
    // BTreeMap::range panics on inverted bounds.
    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Box::new(std::iter::empty());
        }
    }

    let lower = start.map_or(Bound::Unbounded, |k| Bound::Included(k.to_vec()));
    let upper = end.map_or(Bound::Unbounded, |k| Bound::Excluded(k.to_vec()));
    let iter = data
        .range((lower, upper))
        .map(|(k, v)| Ok::<KvPair, KVStoreError>((k.clone(), v.clone())));

    match order {
        Order::Ascending => Box::new(iter),
        Order::Descending => Box::new(iter.rev()),
    }
}
