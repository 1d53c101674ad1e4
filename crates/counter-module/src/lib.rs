//! # counter-module
//!
//! Per-address counters plus an authority-gated params singleton, kept in
//! an ordered key-value store and driven by a replicated state machine.
//!
//! ## Role in System
//!
//! - **Commands**: `MsgIncrementCounter` (any valid address, its own
//!   counter), `MsgUpdateParams` (configured authority only)
//! - **Queries**: one counter, a paginated listing, the current params
//! - **Genesis**: default, validate, import and export of module state
//!
//! ## Request Flow
//!
//! ```text
//! [Replication layer] ──CounterMsg──→ CounterModule::deliver
//!                                         │
//!                                   CacheStore (&mut S)
//!                                         │
//!                                      MsgServer ──→ CounterKeeper ──→ Map / Item
//!                                         │
//!                               commit on Ok, discard on Err
//!
//! [Clients] ──CounterQuery──→ CounterModule::query ──→ QueryServer (&S snapshot)
//! ```
//!
//! ## Storage Layout
//!
//! | Prefix | Collection | Key               | Value            |
//! |--------|------------|-------------------|------------------|
//! | `0x00` | counters   | canonical address | `u64` big-endian |
//! | `0x01` | params     | (singleton)       | bincode params   |
//!
//! ## Execution Model
//!
//! No locks, threads or async. Commands take the store as `&mut`, so only
//! one can run at a time; queries take `&`, so any number can read one
//! snapshot concurrently.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ipc;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use events::*;
pub use ipc::*;
pub use ports::*;
