//! # File-Backed Engine
//!
//! Durable key-value engine persisting a binary snapshot to a single
//! file, for development and light production use without an external
//! database. Every mutating call rewrites the snapshot through a temp
//! file and an atomic rename, so the durability contract of the engine
//! trait holds on return.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::domain::errors::EngineError;
use crate::ports::outbound::{BatchOperation, KvEngine, WriteBatch};

/// File-backed ordered key-value engine.
pub struct FileDb {
    data: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
    path: PathBuf,
}

impl FileDb {
    /// Open or create a store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = Self::load_from_file(&path).unwrap_or_default();

        if data.is_empty() {
            tracing::info!(path = %path.display(), "no existing data file, starting empty");
        } else {
            tracing::info!(path = %path.display(), keys = data.len(), "loaded data file");
        }

        Self {
            data: Mutex::new(data),
            path,
        }
    }

    // Snapshot format: repeated [key_len:u32 le][key][value_len:u32 le][value].
    fn load_from_file(path: &Path) -> Option<BTreeMap<Vec<u8>, Vec<u8>>> {
        let mut file = std::fs::File::open(path).ok()?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).ok()?;

        let mut data = BTreeMap::new();
        let mut cursor = 0;
        while cursor + 4 <= bytes.len() {
            let key_len = u32::from_le_bytes(bytes[cursor..cursor + 4].try_into().ok()?) as usize;
            cursor += 4;
            if cursor + key_len > bytes.len() {
                break;
            }
            let key = bytes[cursor..cursor + key_len].to_vec();
            cursor += key_len;

            if cursor + 4 > bytes.len() {
                break;
            }
            let value_len = u32::from_le_bytes(bytes[cursor..cursor + 4].try_into().ok()?) as usize;
            cursor += 4;
            if cursor + value_len > bytes.len() {
                break;
            }
            let value = bytes[cursor..cursor + value_len].to_vec();
            cursor += value_len;

            data.insert(key, value);
        }
        Some(data)
    }

    fn save_to_file(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::Io(e.to_string()))?;
        }

        let mut bytes = Vec::new();
        for (key, value) in data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file =
            std::fs::File::create(&temp_path).map_err(|e| EngineError::Io(e.to_string()))?;
        file.write_all(&bytes)
            .map_err(|e| EngineError::Io(e.to_string()))?;
        file.sync_all().map_err(|e| EngineError::Io(e.to_string()))?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| EngineError::Io(e.to_string()))
    }
}

impl KvEngine for FileDb {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn set_sync(&self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        let mut data = self.data.lock();
        data.insert(key.to_vec(), value.to_vec());
        self.save_to_file(&data)
    }

    fn delete_sync(&self, key: &[u8]) -> Result<(), EngineError> {
        let mut data = self.data.lock();
        data.remove(key);
        self.save_to_file(&data)
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<(), EngineError> {
        let mut data = self.data.lock();
        for op in batch.into_ops() {
            match op {
                BatchOperation::Set { key, value } => {
                    data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    data.remove(&key);
                }
            }
        }
        self.save_to_file(&data)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, EngineError> {
        let data = self.data.lock();
        Ok(data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
