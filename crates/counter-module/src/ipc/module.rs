//! # Counter Module Registration
//!
//! The surface the replication layer wires up: module name, genesis hooks,
//! one entry point for commands and one for queries.
//!
//! ## Atomicity
//!
//! `deliver` and `init_genesis` run against a `CacheStore` over the caller's
//! store and commit only on success. A failed request leaves the store
//! exactly as it was.

use crate::adapters::CacheStore;
use crate::domain::{
    ConfigError, CounterKeeper, CounterParams, GenesisState, ModuleConfig, ModuleError,
    ParamsValue, MODULE_NAME,
};
use crate::events::{CounterMsg, CounterMsgResponse, CounterQuery, CounterQueryResponse};
use crate::ipc::{MsgServer, QueryServer};
use crate::ports::{AddressCodec, CounterMsgApi, CounterQueryApi, KeyValueStore};
use tracing::{debug, warn};

/// Keeper plus routing for every message and query of the module.
pub struct CounterModule<A, P = CounterParams> {
    keeper: CounterKeeper<A, P>,
}

impl<A: AddressCodec, P: ParamsValue> CounterModule<A, P> {
    /// Validate `config` and build the module.
    pub fn new(codec: A, config: ModuleConfig<P>) -> Result<Self, ConfigError> {
        Ok(Self {
            keeper: CounterKeeper::new(codec, config)?,
        })
    }

    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    /// Configured authority address.
    pub fn authority(&self) -> &str {
        self.keeper.authority()
    }

    pub fn keeper(&self) -> &CounterKeeper<A, P> {
        &self.keeper
    }

    pub fn msg_server(&self) -> MsgServer<'_, A, P> {
        MsgServer::new(&self.keeper)
    }

    pub fn query_server(&self) -> QueryServer<'_, A, P> {
        QueryServer::new(&self.keeper)
    }

    // === Genesis ===

    pub fn default_genesis(&self) -> GenesisState<P> {
        self.keeper.default_genesis()
    }

    pub fn validate_genesis(&self, genesis: &GenesisState<P>) -> Result<(), ModuleError> {
        genesis.validate(self.keeper.codec())?;
        Ok(())
    }

    /// Import `genesis`; nothing is written unless all of it is valid.
    pub fn init_genesis<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        genesis: &GenesisState<P>,
    ) -> Result<(), ModuleError> {
        let mut cache = CacheStore::new(store);
        self.keeper.init_genesis(&mut cache, genesis)?;
        cache.commit()?;
        Ok(())
    }

    pub fn export_genesis<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<GenesisState<P>, ModuleError> {
        self.keeper.export_genesis(store)
    }

    // === Routing ===

    /// Execute one command with all-or-nothing semantics.
    pub fn deliver<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        msg: CounterMsg<P>,
    ) -> Result<CounterMsgResponse, ModuleError> {
        let type_name = msg.type_name();
        let server = self.msg_server();
        let mut cache = CacheStore::new(store);

        let result = match msg {
            CounterMsg::IncrementCounter(m) => server
                .increment_counter(&mut cache, m)
                .map(CounterMsgResponse::IncrementCounter),
            CounterMsg::UpdateParams(m) => server
                .update_params(&mut cache, m)
                .map(CounterMsgResponse::UpdateParams),
        };

        match result {
            Ok(response) => {
                let writes = cache.commit()?;
                debug!("[counter] {} committed {} writes", type_name, writes);
                Ok(response)
            }
            Err(e) => {
                cache.discard();
                warn!("[counter] {} failed: {}", type_name, e);
                Err(e)
            }
        }
    }

    /// Answer one query against a read-only snapshot.
    pub fn query<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        query: CounterQuery,
    ) -> Result<CounterQueryResponse<P>, ModuleError> {
        let server = self.query_server();
        match query {
            CounterQuery::Counter(req) => server.counter(store, req).map(CounterQueryResponse::Counter),
            CounterQuery::Counters(req) => server
                .counters(store, req)
                .map(CounterQueryResponse::Counters),
            CounterQuery::Params(req) => server.params(store, req).map(CounterQueryResponse::Params),
        }
    }
}
