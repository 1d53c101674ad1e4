//! # Typed Collections
//!
//! Typed views over a [`KeyValueStore`]:
//!
//! - [`Map`]: byte-keyed map living under a one-byte namespace prefix
//! - [`Item`]: singleton stored at a one-byte key
//!
//! `get` reports an absent key as [`StoreError::NotFound`], never as a zero
//! value. Callers that treat absence as a default use `may_get`.
//!
//! ## Layout
//!
//! ```text
//! map entry:  [prefix][key bytes...] -> codec(value)
//! item:       [prefix]               -> codec(value)
//! ```

use super::errors::StoreError;
use crate::ports::{prefix_end, KeyValueStore, Order};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Encoding of collection values.
pub trait ValueCodec<V> {
    fn encode(value: &V) -> Result<Vec<u8>, String>;
    fn decode(bytes: &[u8]) -> Result<V, String>;
}

/// 8-byte big-endian `u64`.
pub struct Uint64Value;

impl ValueCodec<u64> for Uint64Value {
    fn encode(value: &u64) -> Result<Vec<u8>, String> {
        Ok(value.to_be_bytes().to_vec())
    }

    fn decode(bytes: &[u8]) -> Result<u64, String> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| format!("expected 8 bytes, got {}", bytes.len()))?;
        Ok(u64::from_be_bytes(raw))
    }
}

/// Deterministic bincode encoding for serde types.
pub struct BincodeValue;

impl<V: Serialize + DeserializeOwned> ValueCodec<V> for BincodeValue {
    fn encode(value: &V) -> Result<Vec<u8>, String> {
        bincode::serialize(value).map_err(|e| e.to_string())
    }

    fn decode(bytes: &[u8]) -> Result<V, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }
}

/// Byte-keyed map under a namespace prefix.
pub struct Map<V, C> {
    prefix: u8,
    name: &'static str,
    _marker: PhantomData<fn() -> (V, C)>,
}

impl<V, C: ValueCodec<V>> Map<V, C> {
    pub const fn new(prefix: u8, name: &'static str) -> Self {
        Self {
            prefix,
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn store_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(1 + key.len());
        full.push(self.prefix);
        full.extend_from_slice(key);
        full
    }

    fn decode(&self, bytes: &[u8]) -> Result<V, StoreError> {
        C::decode(bytes).map_err(|message| StoreError::Codec {
            namespace: self.name,
            message,
        })
    }

    /// Value stored under `key`, or `NotFound`.
    pub fn get<S: KeyValueStore + ?Sized>(&self, store: &S, key: &[u8]) -> Result<V, StoreError> {
        self.may_get(store, key)?.ok_or_else(|| StoreError::NotFound {
            namespace: self.name,
            key: hex::encode(key),
        })
    }

    pub fn may_get<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        key: &[u8],
    ) -> Result<Option<V>, StoreError> {
        match store.get(&self.store_key(key))? {
            Some(bytes) => self.decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    pub fn has<S: KeyValueStore + ?Sized>(&self, store: &S, key: &[u8]) -> Result<bool, StoreError> {
        Ok(store.exists(&self.store_key(key))?)
    }

    pub fn set<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        key: &[u8],
        value: &V,
    ) -> Result<(), StoreError> {
        let bytes = C::encode(value).map_err(|message| StoreError::Codec {
            namespace: self.name,
            message,
        })?;
        store.put(&self.store_key(key), &bytes)?;
        Ok(())
    }

    pub fn remove<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        key: &[u8],
    ) -> Result<(), StoreError> {
        store.delete(&self.store_key(key))?;
        Ok(())
    }

    /// Entries with map keys in `[start, end)`, prefix stripped.
    pub fn range<'a, S: KeyValueStore + ?Sized>(
        &self,
        store: &'a S,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Result<impl Iterator<Item = Result<(Vec<u8>, V), StoreError>> + 'a, StoreError>
    where
        V: 'a,
        C: 'a,
    {
        let lower = match start {
            Some(key) => self.store_key(key),
            None => vec![self.prefix],
        };
        let upper = match end {
            Some(key) => Some(self.store_key(key)),
            None => prefix_end(&[self.prefix]),
        };
        let name = self.name;

        let iter = store.range(Some(lower.as_slice()), upper.as_deref(), order)?;
        Ok(iter.map(move |item| {
            let (key, value) = item?;
            let decoded = C::decode(&value).map_err(|message| StoreError::Codec {
                namespace: name,
                message,
            })?;
            Ok((key[1..].to_vec(), decoded))
        }))
    }
}

/// Singleton value stored at a fixed key.
pub struct Item<V, C> {
    key: u8,
    name: &'static str,
    _marker: PhantomData<fn() -> (V, C)>,
}

impl<V, C: ValueCodec<V>> Item<V, C> {
    pub const fn new(key: u8, name: &'static str) -> Self {
        Self {
            key,
            name,
            _marker: PhantomData,
        }
    }

    pub fn get<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<V, StoreError> {
        self.may_get(store)?.ok_or_else(|| StoreError::NotFound {
            namespace: self.name,
            key: hex::encode([self.key]),
        })
    }

    pub fn may_get<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<Option<V>, StoreError> {
        match store.get(&[self.key])? {
            Some(bytes) => C::decode(&bytes)
                .map(Some)
                .map_err(|message| StoreError::Codec {
                    namespace: self.name,
                    message,
                }),
            None => Ok(None),
        }
    }

    pub fn has<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<bool, StoreError> {
        Ok(store.exists(&[self.key])?)
    }

    pub fn set<S: KeyValueStore + ?Sized>(&self, store: &mut S, value: &V) -> Result<(), StoreError> {
        let bytes = C::encode(value).map_err(|message| StoreError::Codec {
            namespace: self.name,
            message,
        })?;
        store.put(&[self.key], &bytes)?;
        Ok(())
    }
}
