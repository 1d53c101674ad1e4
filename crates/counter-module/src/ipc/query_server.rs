//! # Query Handlers
//!
//! Queries only ever see `&S`, so a response is computed against one
//! unchanging snapshot. Absence is never an error here: a missing counter
//! reads as zero and missing params read as `P::default()`.

use crate::domain::{paginate, Counter, CounterKeeper, CounterParams, ModuleError, ParamsValue};
use crate::events::{
    QueryCounterRequest, QueryCounterResponse, QueryCountersRequest, QueryCountersResponse,
    QueryParamsRequest, QueryParamsResponse,
};
use crate::ports::{AddressCodec, CounterQueryApi, KeyValueStore};

/// Query side of the module, borrowing the keeper.
pub struct QueryServer<'k, A, P = CounterParams> {
    keeper: &'k CounterKeeper<A, P>,
}

impl<'k, A: AddressCodec, P: ParamsValue> QueryServer<'k, A, P> {
    pub fn new(keeper: &'k CounterKeeper<A, P>) -> Self {
        Self { keeper }
    }
}

impl<'k, A: AddressCodec, P: ParamsValue> CounterQueryApi<P> for QueryServer<'k, A, P> {
    fn counter<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        req: QueryCounterRequest,
    ) -> Result<QueryCounterResponse, ModuleError> {
        let address = self.keeper.validate_address("address", &req.address)?;

        let count = match self.keeper.get_counter(store, &address) {
            Ok(count) => count,
            Err(e) if e.is_not_found() => 0,
            Err(e) => return Err(e.into()),
        };

        Ok(QueryCounterResponse { count })
    }

    fn counters<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        req: QueryCountersRequest,
    ) -> Result<QueryCountersResponse, ModuleError> {
        let (counters, pagination) = paginate(
            store,
            self.keeper.counters(),
            req.pagination.as_ref(),
            self.keeper.page_limits(),
            |key, count| {
                Ok(Counter {
                    address: self.keeper.encode_key(&key)?,
                    count,
                })
            },
        )?;

        Ok(QueryCountersResponse {
            counters,
            pagination,
        })
    }

    fn params<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        _req: QueryParamsRequest,
    ) -> Result<QueryParamsResponse<P>, ModuleError> {
        let params = match self.keeper.get_params(store) {
            Ok(params) => params,
            Err(e) if e.is_not_found() => P::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(QueryParamsResponse { params })
    }
}
