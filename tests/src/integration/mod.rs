//! # Integration Tests
//!
//! Drive `CounterModule` the way a replication layer would: typed messages
//! through `deliver`, typed queries through `query`, real store backends.

pub mod fixtures;
pub mod flows;
pub mod persistence;
