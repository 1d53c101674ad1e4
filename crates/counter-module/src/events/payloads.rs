use crate::domain::{Counter, CounterParams, PageRequest, PageResponse};
use serde::{Deserialize, Serialize};

/// Bump the sender's own counter by one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgIncrementCounter {
    pub sender: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgIncrementCounterResponse {}

/// Replace the params singleton. Only the configured authority may send it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MsgUpdateParams<P = CounterParams> {
    pub authority: String,
    pub params: P,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParamsResponse {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCounterRequest {
    pub address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCounterResponse {
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCountersRequest {
    pub pagination: Option<PageRequest>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCountersResponse {
    pub counters: Vec<Counter>,
    pub pagination: PageResponse,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamsRequest {}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParamsResponse<P = CounterParams> {
    pub params: P,
}

/// Every command the module accepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CounterMsg<P = CounterParams> {
    IncrementCounter(MsgIncrementCounter),
    UpdateParams(MsgUpdateParams<P>),
}

impl<P> CounterMsg<P> {
    /// Type URL style name, used in logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            CounterMsg::IncrementCounter(_) => "MsgIncrementCounter",
            CounterMsg::UpdateParams(_) => "MsgUpdateParams",
        }
    }
}

/// Result of a delivered [`CounterMsg`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterMsgResponse {
    IncrementCounter(MsgIncrementCounterResponse),
    UpdateParams(MsgUpdateParamsResponse),
}

/// Every query the module answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterQuery {
    Counter(QueryCounterRequest),
    Counters(QueryCountersRequest),
    Params(QueryParamsRequest),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CounterQueryResponse<P = CounterParams> {
    Counter(QueryCounterResponse),
    Counters(QueryCountersResponse),
    Params(QueryParamsResponse<P>),
}
