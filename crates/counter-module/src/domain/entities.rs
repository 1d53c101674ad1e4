//! # Domain Entities for the Counter Module
//!
//! ## Type Decisions
//!
//! - Counter keys are canonical address bytes, not the caller's text. Two
//!   spellings of one address (e.g. mixed-case hex) share one counter.
//! - Counter values are `u64` and only ever grow by exactly one.
//! - Params are any type implementing [`ParamsValue`]; [`CounterParams`] is
//!   the stock shape shipped with the module.

use super::errors::ParamsError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name the module registers under.
pub const MODULE_NAME: &str = "counter";

/// Store key prefix of the counter map.
pub const COUNTERS_PREFIX: u8 = 0x00;
/// Store key of the params singleton.
pub const PARAMS_PREFIX: u8 = 0x01;

/// Page size used when a request leaves `limit` at zero.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;
/// Hard cap on page size; larger requests are clamped.
pub const MAX_PAGE_LIMIT: u64 = 1_000;
/// Largest `max_limit` a module config may set.
pub const PAGE_LIMIT_CEILING: u64 = 100_000;

/// Fixed-length byte encoding of an account, produced by an `AddressCodec`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanonicalAddress(Vec<u8>);

impl CanonicalAddress {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalAddress({})", hex::encode(&self.0))
    }
}

/// One row of the counter map as seen by callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Textual address, re-encoded from the canonical key.
    pub address: String,
    pub count: u64,
}

/// Module-wide tunable parameters.
///
/// Stored as a singleton and replaced wholesale by `UpdateParams`. The
/// default value is what genesis writes and what queries fall back to.
pub trait ParamsValue:
    Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Structural validation run before every write.
    fn validate(&self) -> Result<(), ParamsError>;
}

/// Maximum byte length of [`CounterParams::label`].
pub const MAX_LABEL_LEN: usize = 64;
/// Maximum number of entries in [`CounterParams::settings`].
pub const MAX_SETTINGS: usize = 32;
/// Maximum byte length of a settings key.
pub const MAX_SETTING_KEY_LEN: usize = 64;
/// Maximum byte length of a settings value.
pub const MAX_SETTING_VALUE_LEN: usize = 256;

/// Stock params for the counter module: a label plus an ordered bag of
/// string settings.
///
/// `BTreeMap` keeps the encoded form identical on every replica.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterParams {
    pub label: String,
    pub settings: BTreeMap<String, String>,
}

impl CounterParams {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Builder method to add a setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

impl ParamsValue for CounterParams {
    fn validate(&self) -> Result<(), ParamsError> {
        if self.label.len() > MAX_LABEL_LEN {
            return Err(ParamsError::LabelTooLong {
                max: MAX_LABEL_LEN,
                actual: self.label.len(),
            });
        }
        if self.label.chars().any(|c| c.is_control()) {
            return Err(ParamsError::LabelNotPrintable);
        }
        if self.settings.len() > MAX_SETTINGS {
            return Err(ParamsError::TooManySettings {
                max: MAX_SETTINGS,
                actual: self.settings.len(),
            });
        }
        for (key, value) in &self.settings {
            if !is_valid_setting_key(key) {
                return Err(ParamsError::InvalidSettingKey { key: key.clone() });
            }
            if value.len() > MAX_SETTING_VALUE_LEN {
                return Err(ParamsError::SettingValueTooLong {
                    key: key.clone(),
                    max: MAX_SETTING_VALUE_LEN,
                });
            }
        }
        Ok(())
    }
}

/// Setting keys are non-empty `[a-z0-9_.]` identifiers.
fn is_valid_setting_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_SETTING_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'.')
}
