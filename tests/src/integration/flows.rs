//! # End-to-End Flows
//!
//! Scenarios a replication layer would drive: increments from many senders,
//! params governance, rejected commands leaving state untouched.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use counter_module::{
        AddressError, CounterMsgResponse, CounterParams, InMemoryKVStore, ModuleError,
        PageRequest,
    };

    // =========================================================================
    // COUNTERS
    // =========================================================================

    #[test]
    fn test_two_senders_then_single_entry_pages() {
        let module = label_module();
        let mut store = InMemoryKVStore::new();

        module.deliver(&mut store, increment("addr1")).unwrap();
        module.deliver(&mut store, increment("addr1")).unwrap();
        module.deliver(&mut store, increment("addr2")).unwrap();

        assert_eq!(count_of(&module, &store, "addr1"), 2);
        assert_eq!(count_of(&module, &store, "addr2"), 1);

        let first = list_page(&module, &store, Some(PageRequest::with_limit(1)));
        assert_eq!(first.counters.len(), 1);
        assert_eq!(first.counters[0].address, "addr1");
        assert_eq!(first.counters[0].count, 2);
        let cursor = first.pagination.next_key.expect("first page must carry a cursor");

        let second = list_page(&module, &store, Some(PageRequest::after(cursor, 1)));
        assert_eq!(second.counters.len(), 1);
        assert_eq!(second.counters[0].address, "addr2");
        assert_eq!(second.counters[0].count, 1);
        assert_eq!(second.pagination.next_key, None);
    }

    #[test]
    fn test_never_seen_address_reads_zero() {
        let module = label_module();
        let store = InMemoryKVStore::new();
        assert_eq!(count_of(&module, &store, "stranger"), 0);
    }

    #[test]
    fn test_n_increments_read_back_n() {
        let module = hex_module();
        let mut store = InMemoryKVStore::new();
        let sender = hex_address(42);

        for n in 1..=25u64 {
            let resp = module.deliver(&mut store, increment(&sender)).unwrap();
            assert!(matches!(resp, CounterMsgResponse::IncrementCounter(_)));
            assert_eq!(count_of(&module, &store, &sender), n);
        }
    }

    #[test]
    fn test_invalid_sender_changes_nothing() {
        let module = label_module();
        let mut store = InMemoryKVStore::new();
        module.deliver(&mut store, increment("addr1")).unwrap();
        let before = store.clone();

        let err = module
            .deliver(&mut store, increment("not-an-address"))
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::InvalidAddress {
                source: AddressError::InvalidEncoding(_),
                ..
            }
        ));
        assert_eq!(store.len(), before.len());
        assert_eq!(count_of(&module, &store, "addr1"), 1);
    }

    #[test]
    fn test_hex_spellings_share_one_counter() {
        let module = hex_module();
        let mut store = InMemoryKVStore::new();
        let lower = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";
        let mixed = "0xABCDEFabcdefABCDEFabcdefABCDEFabcdefABCD";

        module.deliver(&mut store, increment(lower)).unwrap();
        module.deliver(&mut store, increment(mixed)).unwrap();

        assert_eq!(count_of(&module, &store, mixed), 2);
        let listing = list_page(&module, &store, None);
        assert_eq!(listing.counters.len(), 1);
        assert_eq!(listing.counters[0].address, lower);
    }

    // =========================================================================
    // PARAMS GOVERNANCE
    // =========================================================================

    #[test]
    fn test_authority_update_then_outsider_rejected() {
        let module = label_module();
        let mut store = InMemoryKVStore::new();
        let p = CounterParams::with_label("P").with_setting("window", "10");
        let q = CounterParams::with_label("Q");

        module
            .deliver(&mut store, update_params(AUTHORITY_ADDR, p.clone()))
            .unwrap();

        let err = module
            .deliver(&mut store, update_params("otherAddr", q))
            .unwrap_err();
        assert_eq!(
            err,
            ModuleError::Unauthorized {
                got: "otherAddr".to_string(),
                want: AUTHORITY_ADDR.to_string(),
            }
        );

        assert_eq!(params_of(&module, &store), p);
    }

    #[test]
    fn test_update_replaces_params_wholesale() {
        let module = label_module();
        let mut store = InMemoryKVStore::new();

        let first = CounterParams::with_label("one")
            .with_setting("a", "1")
            .with_setting("b", "2");
        let second = CounterParams::with_label("two").with_setting("c", "3");

        module
            .deliver(&mut store, update_params(AUTHORITY_ADDR, first))
            .unwrap();
        module
            .deliver(&mut store, update_params(AUTHORITY_ADDR, second.clone()))
            .unwrap();

        assert_eq!(params_of(&module, &store), second);
    }

    #[test]
    fn test_invalid_params_keep_previous() {
        let module = label_module();
        let mut store = InMemoryKVStore::new();
        let good = CounterParams::with_label("good");
        module
            .deliver(&mut store, update_params(AUTHORITY_ADDR, good.clone()))
            .unwrap();

        let bad = CounterParams::with_label("bad").with_setting("Not A Key", "x");
        let err = module
            .deliver(&mut store, update_params(AUTHORITY_ADDR, bad))
            .unwrap_err();
        assert!(matches!(err, ModuleError::InvalidParams(_)));
        assert_eq!(params_of(&module, &store), good);
    }

    #[test]
    fn test_params_default_before_any_update() {
        let module = label_module();
        let store = InMemoryKVStore::new();
        assert_eq!(params_of(&module, &store), CounterParams::default());
    }

    #[test]
    fn test_authority_may_also_count() {
        let module = label_module();
        let mut store = InMemoryKVStore::new();
        module.deliver(&mut store, increment(AUTHORITY_ADDR)).unwrap();
        assert_eq!(count_of(&module, &store, AUTHORITY_ADDR), 1);
        assert_eq!(module.authority(), AUTHORITY_ADDR);
    }
}
