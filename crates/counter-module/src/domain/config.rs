//! # Module Configuration
//!
//! Immutable settings fixed when the module is constructed. Nothing here is
//! read from the store or changed at runtime.

use super::entities::{CounterParams, ParamsValue, PAGE_LIMIT_CEILING};
use super::errors::{AddressError, ParamsError};
use super::pagination::PageLimits;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid authority address {address:?}: {source}")]
    InvalidAuthority {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("invalid default params: {0}")]
    InvalidDefaultParams(#[from] ParamsError),

    #[error("invalid page limits: default {default_limit}, max {max_limit}")]
    InvalidPageLimits { default_limit: u64, max_limit: u64 },
}

/// Counter module configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleConfig<P = CounterParams> {
    /// The only address allowed to replace params.
    pub authority: String,
    /// Params written at genesis and served when none are stored.
    pub default_params: P,
    /// Page sizes for bulk queries.
    pub page_limits: PageLimits,
}

impl<P: ParamsValue> ModuleConfig<P> {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            default_params: P::default(),
            page_limits: PageLimits::default(),
        }
    }

    /// Builder method to set the genesis-default params.
    pub fn with_default_params(mut self, params: P) -> Self {
        self.default_params = params;
        self
    }

    /// Builder method to set page limits.
    pub fn with_page_limits(mut self, page_limits: PageLimits) -> Self {
        self.page_limits = page_limits;
        self
    }

    /// Checks that do not need an address codec.
    ///
    /// The authority itself is decoded by the keeper at construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_params.validate()?;

        let limits = self.page_limits;
        if limits.default_limit == 0
            || limits.default_limit > limits.max_limit
            || limits.max_limit > PAGE_LIMIT_CEILING
        {
            return Err(ConfigError::InvalidPageLimits {
                default_limit: limits.default_limit,
                max_limit: limits.max_limit,
            });
        }
        Ok(())
    }
}
