//! # Durable Backends
//!
//! Committed commands survive a reopen; rejected commands never reach disk.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use counter_module::{CounterParams, FileBackedKVStore, FileStoreConfig, ModuleError};
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> FileBackedKVStore {
        FileBackedKVStore::open(FileStoreConfig::for_testing(dir.path().join("counter.db"))).unwrap()
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let module = hex_module();
        let alice = hex_address(1);
        let params = CounterParams::with_label("persisted");

        {
            let mut store = open(&dir);
            module.deliver(&mut store, increment(&alice)).unwrap();
            module.deliver(&mut store, increment(&alice)).unwrap();
            module
                .deliver(&mut store, update_params(HEX_AUTHORITY, params.clone()))
                .unwrap();
        }

        let store = open(&dir);
        assert_eq!(count_of(&module, &store, &alice), 2);
        assert_eq!(params_of(&module, &store), params);
    }

    #[test]
    fn test_rejected_command_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let module = hex_module();
        let mut store = open(&dir);
        module.deliver(&mut store, increment(&hex_address(5))).unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let err = module
            .deliver(&mut store, update_params(&hex_address(6), CounterParams::default()))
            .unwrap_err();
        assert!(matches!(err, ModuleError::Unauthorized { .. }));
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_overflow_is_rejected_and_persisted_value_kept() {
        let dir = TempDir::new().unwrap();
        let module = hex_module();
        let alice = hex_address(9);

        {
            let mut store = open(&dir);
            let canonical = module.keeper().validate_address("sender", &alice).unwrap();
            module
                .keeper()
                .set_counter(&mut store, &canonical, u64::MAX)
                .unwrap();
        }

        let mut store = open(&dir);
        let err = module.deliver(&mut store, increment(&alice)).unwrap_err();
        assert!(matches!(err, ModuleError::CounterOverflow { .. }));
        assert_eq!(count_of(&module, &store, &alice), u64::MAX);
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn test_rocksdb_survives_reopen() {
        use counter_module::{RocksDbConfig, RocksDbStore};

        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let module = hex_module();
        let alice = hex_address(3);

        {
            let mut store = RocksDbStore::open(RocksDbConfig::for_testing(path.clone())).unwrap();
            for _ in 0..3 {
                module.deliver(&mut store, increment(&alice)).unwrap();
            }
        }

        let store = RocksDbStore::open(RocksDbConfig::for_testing(path)).unwrap();
        assert_eq!(count_of(&module, &store, &alice), 3);
        let listing = list_page(&module, &store, None);
        assert_eq!(listing.counters.len(), 1);
    }
}
