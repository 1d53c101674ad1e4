//! # Counter Keeper
//!
//! Owns the module's collections, its address codec and its immutable
//! configuration. Handlers in `ipc/` go through the keeper for every read
//! and write; the keeper never holds a store itself; each call receives the
//! snapshot it operates on.

use super::collections::{BincodeValue, Item, Map, Uint64Value};
use super::config::{ConfigError, ModuleConfig};
use super::entities::{
    CanonicalAddress, Counter, CounterParams, ParamsValue, COUNTERS_PREFIX, PARAMS_PREFIX,
};
use super::errors::{ModuleError, StoreError};
use super::genesis::{GenesisError, GenesisState};
use super::pagination::PageLimits;
use crate::ports::{AddressCodec, KeyValueStore, Order};
use tracing::info;

/// Counter module state access.
pub struct CounterKeeper<A, P = CounterParams> {
    codec: A,
    config: ModuleConfig<P>,
    authority: CanonicalAddress,
    counters: Map<u64, Uint64Value>,
    params: Item<P, BincodeValue>,
}

impl<A: AddressCodec, P: ParamsValue> CounterKeeper<A, P> {
    /// Validate `config` and decode the authority once.
    pub fn new(codec: A, config: ModuleConfig<P>) -> Result<Self, ConfigError> {
        config.validate()?;
        let authority = codec.string_to_bytes(&config.authority).map_err(|source| {
            ConfigError::InvalidAuthority {
                address: config.authority.clone(),
                source,
            }
        })?;

        Ok(Self {
            codec,
            config,
            authority,
            counters: Map::new(COUNTERS_PREFIX, "counters"),
            params: Item::new(PARAMS_PREFIX, "params"),
        })
    }

    /// Configured authority, as given in the config.
    pub fn authority(&self) -> &str {
        &self.config.authority
    }

    pub(crate) fn authority_bytes(&self) -> &CanonicalAddress {
        &self.authority
    }

    pub fn codec(&self) -> &A {
        &self.codec
    }

    pub fn config(&self) -> &ModuleConfig<P> {
        &self.config
    }

    pub fn page_limits(&self) -> PageLimits {
        self.config.page_limits
    }

    pub(crate) fn counters(&self) -> &Map<u64, Uint64Value> {
        &self.counters
    }

    /// Decode `text`, tagging failures with the request field name.
    pub fn validate_address(
        &self,
        field: &'static str,
        text: &str,
    ) -> Result<CanonicalAddress, ModuleError> {
        self.codec
            .string_to_bytes(text)
            .map_err(|source| ModuleError::InvalidAddress {
                field,
                address: text.to_string(),
                source,
            })
    }

    /// Stored count, or `NotFound` if the address never incremented.
    pub fn get_counter<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        address: &CanonicalAddress,
    ) -> Result<u64, StoreError> {
        self.counters.get(store, address.as_bytes())
    }

    pub fn set_counter<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        address: &CanonicalAddress,
        count: u64,
    ) -> Result<(), StoreError> {
        self.counters.set(store, address.as_bytes(), &count)
    }

    /// Stored params, or `NotFound` before genesis.
    pub fn get_params<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<P, StoreError> {
        self.params.get(store)
    }

    pub fn set_params<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        params: &P,
    ) -> Result<(), StoreError> {
        self.params.set(store, params)
    }

    /// Textual form of a stored counter key.
    pub fn encode_key(&self, key: &[u8]) -> Result<String, ModuleError> {
        self.codec
            .bytes_to_string(key)
            .map_err(|e| ModuleError::Internal(format!("undecodable counter key: {}", e)))
    }

    /// Genesis document carrying the configured default params.
    pub fn default_genesis(&self) -> GenesisState<P> {
        GenesisState::new(self.config.default_params.clone())
    }

    /// Write `genesis` into `store`. The caller decides atomicity.
    pub fn init_genesis<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        genesis: &GenesisState<P>,
    ) -> Result<(), ModuleError> {
        genesis.validate(&self.codec)?;

        self.set_params(store, &genesis.params)?;
        for counter in &genesis.counters {
            let address = self.validate_address("counter", &counter.address)?;
            self.set_counter(store, &address, counter.count)?;
        }

        info!(
            "[counter] Genesis initialized with {} counters",
            genesis.counters.len()
        );
        Ok(())
    }

    /// Params (default if absent) plus every counter in key order.
    pub fn export_genesis<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<GenesisState<P>, ModuleError> {
        let params = match self.params.may_get(store)? {
            Some(params) => params,
            None => self.config.default_params.clone(),
        };

        let mut counters = Vec::new();
        for entry in self.counters.range(store, None, None, Order::Ascending)? {
            let (key, count) = entry?;
            counters.push(Counter {
                address: self.encode_key(&key)?,
                count,
            });
        }

        info!("[counter] Genesis exported with {} counters", counters.len());
        Ok(GenesisState { params, counters })
    }
}

impl From<GenesisError> for ModuleError {
    fn from(err: GenesisError) -> Self {
        ModuleError::InvalidRequest(err.to_string())
    }
}
