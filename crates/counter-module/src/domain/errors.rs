//! # Domain Errors
//!
//! Error types for the counter module, one enum per layer:
//!
//! - `KVStoreError`: raw backend failures (I/O, corruption)
//! - `StoreError`: typed collection failures, including the `NotFound` signal
//! - `AddressError`: textual address could not be decoded
//! - `ParamsError`: params failed their structural validation
//! - `ModuleError`: what command and query handlers return to callers
//!
//! `NotFound` never reaches a caller as-is: handlers either absorb it into a
//! default value or report it as `Internal`.

use thiserror::Error;

/// Errors raised by a key-value backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    #[error("I/O error: {message}")]
    IOError { message: String },

    #[error("Data corruption: {message}")]
    Corruption { message: String },
}

/// Errors raised by typed collections over a key-value backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No value is stored under the key. Distinct from a stored zero.
    #[error("{namespace}: key {key} not found")]
    NotFound { namespace: &'static str, key: String },

    #[error("{namespace}: value codec failed: {message}")]
    Codec {
        namespace: &'static str,
        message: String,
    },

    #[error(transparent)]
    Backend(#[from] KVStoreError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Reasons a textual address fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,

    #[error("address must start with prefix {expected:?}")]
    MissingPrefix { expected: String },

    #[error("invalid address encoding: {0}")]
    InvalidEncoding(String),

    #[error("address length must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Structural validation failures for a params value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("label exceeds {max} bytes: {actual}")]
    LabelTooLong { max: usize, actual: usize },

    #[error("label contains non-printable characters")]
    LabelNotPrintable,

    #[error("too many settings: max {max}, got {actual}")]
    TooManySettings { max: usize, actual: usize },

    #[error("invalid setting key {key:?}")]
    InvalidSettingKey { key: String },

    #[error("setting {key:?} value exceeds {max} bytes")]
    SettingValueTooLong { key: String, max: usize },
}

/// Errors returned by command and query handlers.
///
/// Every variant aborts the request with no state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    /// A request's subject address failed to decode.
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        address: String,
        #[source]
        source: AddressError,
    },

    /// `UpdateParams` signed by someone other than the module authority.
    #[error("unauthorized, authority does not match the module's authority: got {got}, want {want}")]
    Unauthorized { got: String, want: String },

    #[error("invalid params: {0}")]
    InvalidParams(#[from] ParamsError),

    /// The counter is already at `u64::MAX`.
    #[error("counter overflow for {address}")]
    CounterOverflow { address: String },

    /// Malformed request shape (e.g. both pagination key and offset set).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected store failure, surfaced opaquely.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ModuleError {
    fn from(err: StoreError) -> Self {
        ModuleError::Internal(err.to_string())
    }
}

impl From<KVStoreError> for ModuleError {
    fn from(err: KVStoreError) -> Self {
        ModuleError::Internal(err.to_string())
    }
}
