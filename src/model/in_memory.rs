//! InMemoryModelStore - HashMap-backed model store for testing and development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{decode_collection, encode_collection, Model, ModelStore, StorageError};

/// In-memory model store backed by a HashMap.
///
/// Each collection is kept as the same JSON bytes the file store would
/// write. Clone-friendly via Arc; clones share storage and the write switch.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryModelStore {
    /// Create a new store with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose `M` collection already holds `models`.
    pub fn seeded<M: Model>(models: &[M]) -> Result<Self, StorageError> {
        let store = Self::new();
        store.put_raw(M::COLLECTION, encode_collection(models)?)?;
        Ok(store)
    }

    /// Make every following write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Overwrite a collection with raw bytes, valid JSON or not.
    pub fn put_raw(&self, collection: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let mut storage = self.storage.write().map_err(|_| poisoned(collection))?;
        storage.insert(collection.to_string(), bytes);
        Ok(())
    }

    /// The raw bytes of a collection, if it exists.
    pub fn raw(&self, collection: &str) -> Option<Vec<u8>> {
        self.storage
            .read()
            .ok()
            .and_then(|storage| storage.get(collection).cloned())
    }

    fn slot(collection: &str) -> String {
        format!("memory:{}", collection)
    }
}

fn poisoned(collection: &str) -> StorageError {
    StorageError::Io {
        path: InMemoryModelStore::slot(collection),
        reason: "lock poisoned".into(),
    }
}

impl ModelStore for InMemoryModelStore {
    fn load_models<M: Model>(&self) -> Result<Vec<M>, StorageError> {
        let storage = self.storage.read().map_err(|_| poisoned(M::COLLECTION))?;
        let bytes = storage
            .get(M::COLLECTION)
            .ok_or_else(|| StorageError::Missing {
                path: Self::slot(M::COLLECTION),
            })?;
        decode_collection(bytes)
    }

    fn store_models<M: Model>(&self, models: &[M]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: Self::slot(M::COLLECTION),
                reason: "writes disabled".into(),
            });
        }

        let bytes = encode_collection(models)?;
        self.put_raw(M::COLLECTION, bytes)
    }

    fn ensure_collection<M: Model>(&self) -> Result<bool, StorageError> {
        let mut storage = self.storage.write().map_err(|_| poisoned(M::COLLECTION))?;
        if storage.contains_key(M::COLLECTION) {
            return Ok(false);
        }
        storage.insert(M::COLLECTION.to_string(), b"[]".to_vec());
        Ok(true)
    }
}
