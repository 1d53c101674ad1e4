//! # Cache Store (Write Buffer)
//!
//! Buffers writes on top of a parent store so a request's effects land all
//! at once or not at all.
//!
//! - Reads see buffered writes first, then the parent.
//! - `commit()` flushes the buffer through `atomic_batch_write`.
//! - Dropping the cache without committing discards the buffer.
//!
//! The parent is borrowed mutably for the cache's lifetime, so nothing else
//! can write to it while a request is in flight.

use crate::domain::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, KvIter, KvPair, Order};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Write-buffering overlay over any [`KeyValueStore`].
pub struct CacheStore<'a, S: KeyValueStore + ?Sized> {
    parent: &'a mut S,
    /// `None` marks a buffered delete.
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a, S: KeyValueStore + ?Sized> CacheStore<'a, S> {
    pub fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            pending: BTreeMap::new(),
        }
    }

    /// Number of buffered writes.
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Flush every buffered write to the parent as one atomic batch.
    ///
    /// Returns the number of operations written.
    pub fn commit(self) -> Result<usize, KVStoreError> {
        let operations: Vec<BatchOperation> = self
            .pending
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOperation::Put { key, value },
                None => BatchOperation::Delete { key },
            })
            .collect();

        let count = operations.len();
        if count > 0 {
            self.parent.atomic_batch_write(operations)?;
        }
        Ok(count)
    }

    /// Drop every buffered write.
    pub fn discard(self) {}
}

impl<'a, S: KeyValueStore + ?Sized> KeyValueStore for CacheStore<'a, S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.pending.get(key) {
            Some(buffered) => Ok(buffered.clone()),
            None => self.parent.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.pending.insert(key.to_vec(), None);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.pending.insert(key, Some(value));
                }
                BatchOperation::Delete { key } => {
                    self.pending.insert(key, None);
                }
            }
        }
        Ok(())
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Result<KvIter<'b>, KVStoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self
            .parent
            .range(start, end, Order::Ascending)?
            .collect::<Result<_, _>>()?;

        let empty = matches!((start, end), (Some(s), Some(e)) if s >= e);
        if !empty {
            let lower = start.map_or(Bound::Unbounded, |k| Bound::Included(k.to_vec()));
            let upper = end.map_or(Bound::Unbounded, |k| Bound::Excluded(k.to_vec()));
            for (key, value) in self.pending.range((lower, upper)) {
                match value {
                    Some(value) => {
                        merged.insert(key.clone(), value.clone());
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
        }

        let entries: Vec<KvPair> = merged.into_iter().collect();
        Ok(match order {
            Order::Ascending => Box::new(entries.into_iter().map(Ok)),
            Order::Descending => Box::new(entries.into_iter().rev().map(Ok)),
        })
    }
}
