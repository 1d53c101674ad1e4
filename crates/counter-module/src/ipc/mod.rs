//! # Request Handlers
//!
//! - `MsgServer`: command handlers, mutate the store
//! - `QueryServer`: read-only query handlers
//! - `CounterModule`: routes typed messages and queries, owns atomicity

pub mod module;
pub mod msg_server;
pub mod query_server;

pub use module::*;
pub use msg_server::*;
pub use query_server::*;
