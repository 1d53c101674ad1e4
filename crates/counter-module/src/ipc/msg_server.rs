//! # Command Handlers
//!
//! Both handlers validate fully before their single write, so a rejected
//! command never touches the store. `CounterModule::deliver` additionally
//! runs them inside a `CacheStore` so backend failures cannot leave a
//! partial write behind.

use crate::domain::{CounterKeeper, CounterParams, ModuleError, ParamsValue};
use crate::events::{
    MsgIncrementCounter, MsgIncrementCounterResponse, MsgUpdateParams, MsgUpdateParamsResponse,
};
use crate::ports::{AddressCodec, CounterMsgApi, KeyValueStore};
use tracing::{debug, warn};

/// Command side of the module, borrowing the keeper.
pub struct MsgServer<'k, A, P = CounterParams> {
    keeper: &'k CounterKeeper<A, P>,
}

impl<'k, A: AddressCodec, P: ParamsValue> MsgServer<'k, A, P> {
    pub fn new(keeper: &'k CounterKeeper<A, P>) -> Self {
        Self { keeper }
    }
}

impl<'k, A: AddressCodec, P: ParamsValue> CounterMsgApi<P> for MsgServer<'k, A, P> {
    fn increment_counter<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        msg: MsgIncrementCounter,
    ) -> Result<MsgIncrementCounterResponse, ModuleError> {
        let sender = self.keeper.validate_address("sender", &msg.sender)?;

        let current = self
            .keeper
            .counters()
            .may_get(store, sender.as_bytes())?
            .unwrap_or(0);

        let next = current.checked_add(1).ok_or_else(|| {
            warn!("[counter] Counter for {} is at u64::MAX", msg.sender);
            ModuleError::CounterOverflow {
                address: msg.sender.clone(),
            }
        })?;

        self.keeper.set_counter(store, &sender, next)?;
        debug!("[counter] {} incremented to {}", msg.sender, next);

        Ok(MsgIncrementCounterResponse {})
    }

    fn update_params<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        msg: MsgUpdateParams<P>,
    ) -> Result<MsgUpdateParamsResponse, ModuleError> {
        let authority = self.keeper.validate_address("authority", &msg.authority)?;

        if &authority != self.keeper.authority_bytes() {
            warn!(
                "[counter] ⛔ Rejected params update from {}",
                msg.authority
            );
            return Err(ModuleError::Unauthorized {
                got: msg.authority,
                want: self.keeper.authority().to_string(),
            });
        }

        if let Err(e) = msg.params.validate() {
            warn!("[counter] Rejected invalid params: {}", e);
            return Err(e.into());
        }

        self.keeper.set_params(store, &msg.params)?;
        debug!("[counter] Params replaced by {}", msg.authority);

        Ok(MsgUpdateParamsResponse {})
    }
}
