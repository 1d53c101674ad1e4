//! Shared fixtures for the integration tests and benchmarks.

use counter_module::{
    AddressCodec, AddressError, CanonicalAddress, CounterModule, CounterMsg, CounterParams,
    CounterQuery, CounterQueryResponse, HexAddressCodec, KeyValueStore, ModuleConfig,
    MsgIncrementCounter, MsgUpdateParams, PageRequest, QueryCounterRequest,
    QueryCountersRequest, QueryCountersResponse, QueryParamsRequest,
};
use std::sync::Once;

/// Longest label accepted by [`LabelAddressCodec`].
pub const MAX_LABEL_ADDRESS_LEN: usize = 32;

/// Plain-label addresses such as `addr1` or `authorityAddr`.
///
/// Any non-empty ASCII alphanumeric label up to 32 bytes is valid; its bytes
/// are the canonical form. Lets scenarios read like the ledger docs.
#[derive(Clone, Debug, Default)]
pub struct LabelAddressCodec;

impl AddressCodec for LabelAddressCodec {
    fn string_to_bytes(&self, text: &str) -> Result<CanonicalAddress, AddressError> {
        if text.is_empty() {
            return Err(AddressError::Empty);
        }
        if !text.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(AddressError::InvalidEncoding(format!(
                "{:?} is not alphanumeric",
                text
            )));
        }
        if text.len() > MAX_LABEL_ADDRESS_LEN {
            return Err(AddressError::InvalidLength {
                expected: MAX_LABEL_ADDRESS_LEN,
                actual: text.len(),
            });
        }
        Ok(CanonicalAddress::new(text.as_bytes()))
    }

    fn bytes_to_string(&self, bytes: &[u8]) -> Result<String, AddressError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| AddressError::InvalidEncoding(e.to_string()))
    }
}

pub const AUTHORITY_ADDR: &str = "authorityAddr";
pub const HEX_AUTHORITY: &str = "0x00000000000000000000000000000000000000aa";

static TRACING: Once = Once::new();

/// Install a test subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn label_module() -> CounterModule<LabelAddressCodec> {
    init_tracing();
    match CounterModule::new(LabelAddressCodec, ModuleConfig::new(AUTHORITY_ADDR)) {
        Ok(module) => module,
        Err(e) => panic!("label module config rejected: {}", e),
    }
}

pub fn hex_module() -> CounterModule<HexAddressCodec> {
    init_tracing();
    match CounterModule::new(HexAddressCodec::default(), ModuleConfig::new(HEX_AUTHORITY)) {
        Ok(module) => module,
        Err(e) => panic!("hex module config rejected: {}", e),
    }
}

/// `0x`-prefixed address whose 20 bytes are the big-endian `n`, zero padded.
pub fn hex_address(n: u64) -> String {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    format!("0x{}", hex::encode(bytes))
}

pub fn increment(sender: &str) -> CounterMsg {
    CounterMsg::IncrementCounter(MsgIncrementCounter {
        sender: sender.to_string(),
    })
}

pub fn update_params(authority: &str, params: CounterParams) -> CounterMsg {
    CounterMsg::UpdateParams(MsgUpdateParams {
        authority: authority.to_string(),
        params,
    })
}

pub fn count_of<A: AddressCodec, S: KeyValueStore + ?Sized>(
    module: &CounterModule<A>,
    store: &S,
    address: &str,
) -> u64 {
    let query = CounterQuery::Counter(QueryCounterRequest {
        address: address.to_string(),
    });
    match module.query(store, query) {
        Ok(CounterQueryResponse::Counter(resp)) => resp.count,
        other => panic!("unexpected counter response {:?}", other),
    }
}

pub fn params_of<A: AddressCodec, S: KeyValueStore + ?Sized>(
    module: &CounterModule<A>,
    store: &S,
) -> CounterParams {
    match module.query(store, CounterQuery::Params(QueryParamsRequest {})) {
        Ok(CounterQueryResponse::Params(resp)) => resp.params,
        other => panic!("unexpected params response {:?}", other),
    }
}

pub fn list_page<A: AddressCodec, S: KeyValueStore + ?Sized>(
    module: &CounterModule<A>,
    store: &S,
    pagination: Option<PageRequest>,
) -> QueryCountersResponse {
    match module.query(store, CounterQuery::Counters(QueryCountersRequest { pagination })) {
        Ok(CounterQueryResponse::Counters(resp)) => resp,
        other => panic!("unexpected counters response {:?}", other),
    }
}
