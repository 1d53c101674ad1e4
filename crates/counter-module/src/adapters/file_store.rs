use super::memory_store::{apply_batch, btree_range};
use crate::domain::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, KvIter, Order};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for [`FileBackedKVStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Path to the data file
    pub path: PathBuf,
    /// fsync the temp file before renaming it into place (default: true)
    pub sync_writes: bool,
}

impl FileStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync_writes: true,
        }
    }

    /// Config for tests (no fsync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync_writes: false,
        }
    }
}

/// File-backed key-value store for hosts without RocksDB.
///
/// The whole keyspace lives in memory and is rewritten to disk on every
/// write as `[key_len:u32 LE][key][value_len:u32 LE][value]...`. The new
/// image goes to a temp file that is renamed over the old one, so a crash
/// leaves either the previous or the new contents.
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    config: FileStoreConfig,
}

impl FileBackedKVStore {
    /// Open the store at `config.path`, loading existing contents.
    ///
    /// A missing file opens an empty store. A truncated file is reported as
    /// `Corruption` rather than silently dropping entries.
    pub fn open(config: FileStoreConfig) -> Result<Self, KVStoreError> {
        let data = match std::fs::File::open(&config.path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).map_err(io_error)?;
                decode_image(&bytes)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "[counter] 📁 No existing storage file at {}",
                    config.path.display()
                );
                BTreeMap::new()
            }
            Err(e) => return Err(io_error(e)),
        };

        if !data.is_empty() {
            info!(
                "[counter] 💾 Loaded {} keys from {}",
                data.len(),
                config.path.display()
            );
        }

        Ok(Self { data, config })
    }

    /// Shorthand for `open(FileStoreConfig::new(path))`.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, KVStoreError> {
        Self::open(FileStoreConfig::new(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Persist `next` and swap it in. On error the in-memory state is
    /// left unchanged.
    fn commit(&mut self, next: BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        self.save_to_file(&next)?;
        self.data = next;
        Ok(())
    }

    fn save_to_file(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let bytes = encode_image(data)?;
        let temp_path = self.config.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        if self.config.sync_writes {
            file.sync_all().map_err(io_error)?;
        }
        std::fs::rename(&temp_path, &self.config.path).map_err(io_error)?;

        debug!(
            "[counter] Persisted {} keys ({} bytes) to {}",
            data.len(),
            bytes.len(),
            self.config.path.display()
        );
        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        self.atomic_batch_write(vec![BatchOperation::delete(key)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        apply_batch(&mut next, operations);
        self.commit(next)
    }

    fn range<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Result<KvIter<'a>, KVStoreError> {
        Ok(btree_range(&self.data, start, end, order))
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn encode_image(data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<Vec<u8>, KVStoreError> {
    let mut bytes = Vec::new();
    for (key, value) in data {
        for field in [key, value] {
            let len = u32::try_from(field.len()).map_err(|_| KVStoreError::IOError {
                message: format!("entry of {} bytes exceeds the file format limit", field.len()),
            })?;
            bytes.extend_from_slice(&len.to_le_bytes());
            bytes.extend_from_slice(field);
        }
    }
    Ok(bytes)
}

fn decode_image(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
    let mut data = BTreeMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_field(bytes, &mut cursor)?;
        let value = read_field(bytes, &mut cursor)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn read_field(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let truncated = |at: usize| KVStoreError::Corruption {
        message: format!("storage file truncated at byte {}", at),
    };

    let header_end = cursor.checked_add(4).ok_or_else(|| truncated(*cursor))?;
    let header: [u8; 4] = bytes
        .get(*cursor..header_end)
        .and_then(|h| h.try_into().ok())
        .ok_or_else(|| truncated(*cursor))?;
    let len = u32::from_le_bytes(header) as usize;

    let field_end = header_end.checked_add(len).ok_or_else(|| truncated(header_end))?;
    let field = bytes
        .get(header_end..field_end)
        .ok_or_else(|| truncated(header_end))?
        .to_vec();
    *cursor = field_end;
    Ok(field)
}
