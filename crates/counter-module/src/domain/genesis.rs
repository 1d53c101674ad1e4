//! # Genesis State
//!
//! The document a chain starts from (and exports to): the params singleton
//! plus every counter. Import and export are JSON.

use super::entities::{Counter, CounterParams, ParamsValue};
use super::errors::{AddressError, ParamsError};
use crate::ports::AddressCodec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Genesis validation and (de)serialization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("invalid genesis params: {0}")]
    InvalidParams(#[from] ParamsError),

    #[error("invalid counter address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("duplicate counter for address {address}")]
    DuplicateCounter { address: String },

    #[error("malformed genesis document: {0}")]
    Malformed(String),
}

/// Module state at chain start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: ParamsValue"))]
pub struct GenesisState<P = CounterParams> {
    pub params: P,
    #[serde(default)]
    pub counters: Vec<Counter>,
}

impl<P: ParamsValue> GenesisState<P> {
    pub fn new(params: P) -> Self {
        Self {
            params,
            counters: Vec::new(),
        }
    }

    /// Builder method to seed a counter.
    pub fn with_counter(mut self, address: impl Into<String>, count: u64) -> Self {
        self.counters.push(Counter {
            address: address.into(),
            count,
        });
        self
    }

    /// Params must validate; counter addresses must decode and be unique
    /// after canonicalization.
    pub fn validate<A: AddressCodec + ?Sized>(&self, codec: &A) -> Result<(), GenesisError> {
        self.params.validate()?;

        let mut seen = BTreeSet::new();
        for counter in &self.counters {
            let canonical = codec.string_to_bytes(&counter.address).map_err(|source| {
                GenesisError::InvalidAddress {
                    address: counter.address.clone(),
                    source,
                }
            })?;
            if !seen.insert(canonical) {
                return Err(GenesisError::DuplicateCounter {
                    address: counter.address.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, GenesisError> {
        serde_json::from_slice(bytes).map_err(|e| GenesisError::Malformed(e.to_string()))
    }

    pub fn to_json(&self) -> Result<Vec<u8>, GenesisError> {
        serde_json::to_vec_pretty(self).map_err(|e| GenesisError::Malformed(e.to_string()))
    }
}
