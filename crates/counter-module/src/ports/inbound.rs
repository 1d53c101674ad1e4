//! # Inbound Ports (Driving Ports)
//!
//! What the replication layer calls into. Commands receive the exclusive
//! `&mut` store for the block being executed; queries receive a shared
//! snapshot.

use crate::domain::{CounterParams, ModuleError, ParamsValue};
use crate::events::{
    MsgIncrementCounter, MsgIncrementCounterResponse, MsgUpdateParams, MsgUpdateParamsResponse,
    QueryCounterRequest, QueryCounterResponse, QueryCountersRequest, QueryCountersResponse,
    QueryParamsRequest, QueryParamsResponse,
};
use crate::ports::KeyValueStore;

/// Command handlers.
pub trait CounterMsgApi<P: ParamsValue = CounterParams> {
    // === Any account ===

    fn increment_counter<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        msg: MsgIncrementCounter,
    ) -> Result<MsgIncrementCounterResponse, ModuleError>;

    // === Authority only ===

    fn update_params<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        msg: MsgUpdateParams<P>,
    ) -> Result<MsgUpdateParamsResponse, ModuleError>;
}

/// Read-only query handlers.
pub trait CounterQueryApi<P: ParamsValue = CounterParams> {
    fn counter<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        req: QueryCounterRequest,
    ) -> Result<QueryCounterResponse, ModuleError>;

    fn counters<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        req: QueryCountersRequest,
    ) -> Result<QueryCountersResponse, ModuleError>;

    fn params<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        req: QueryParamsRequest,
    ) -> Result<QueryParamsResponse<P>, ModuleError>;
}
