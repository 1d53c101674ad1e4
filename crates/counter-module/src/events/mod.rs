//! # Message and Query Payloads
//!
//! ## Commands
//!
//! - `MsgIncrementCounter`: any valid address, bumps its own counter
//! - `MsgUpdateParams`: authority only, replaces params wholesale
//!
//! ## Queries
//!
//! - `QueryCounterRequest`: one counter, zero when absent
//! - `QueryCountersRequest`: paginated listing in key order
//! - `QueryParamsRequest`: current params

pub mod payloads;

pub use payloads::*;
