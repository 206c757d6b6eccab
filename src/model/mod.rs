//! Models - whole-collection storage for catalogue records.
//!
//! Every collection is loaded in full, mutated in memory and written back in
//! full. A store maps each [`Model`] type to one JSON array, named by its
//! `COLLECTION`.
//!
//! ## Example
//!
//! ```ignore
//! use library_catalogue::{Item, JsonFileStore, ModelsExt};
//!
//! let store = JsonFileStore::new("data");
//! let loaded = store.models::<Item>().load_or_empty();
//! store.models::<Item>().store(&loaded.models)?;
//! ```

mod in_memory;
mod json_file;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::warn;

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone {
    /// The collection name for this model type (e.g. "items", "users").
    /// Maps to one file in the JSON store.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing file (or in-memory slot) does not exist.
    #[error("{path} does not exist")]
    Missing { path: String },
    /// The collection holds no records.
    #[error("{collection} collection is empty")]
    Empty { collection: String },
    /// The collection could not be parsed or encoded.
    #[error("{collection} collection is not formatted correctly: {reason}")]
    Malformed { collection: String, reason: String },
    /// Reading or writing failed.
    #[error("failed to access {path}: {reason}")]
    Io { path: String, reason: String },
    /// An update named a record the collection does not hold.
    #[error("{collection} record {id} not found")]
    NotFound { collection: String, id: String },
}

impl StorageError {
    pub fn is_missing(&self) -> bool {
        matches!(self, StorageError::Missing { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StorageError::Empty { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StorageError::Malformed { .. })
    }
}

/// A collection loaded with load errors degraded to "no records".
#[derive(Debug, Clone)]
pub struct Loaded<M> {
    pub models: Vec<M>,
    pub issue: Option<StorageError>,
}

fn decode_collection<M: Model>(bytes: &[u8]) -> Result<Vec<M>, StorageError> {
    let malformed = |e: serde_json::Error| StorageError::Malformed {
        collection: M::COLLECTION.to_string(),
        reason: e.to_string(),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(StorageError::Empty {
            collection: M::COLLECTION.to_string(),
        });
    }

    let records: Vec<serde_json::Value> = serde_json::from_slice(bytes).map_err(malformed)?;
    if records.is_empty() {
        return Err(StorageError::Empty {
            collection: M::COLLECTION.to_string(),
        });
    }

    // Unreadable records (an unknown item type, say) are dropped one by one.
    let mut models = Vec::with_capacity(records.len());
    let mut first_error = None;
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<M>(record) {
            Ok(model) => models.push(model),
            Err(error) => {
                warn!(collection = M::COLLECTION, index, %error, "skipping unreadable record");
                first_error.get_or_insert(error);
            }
        }
    }

    match first_error {
        Some(error) if models.is_empty() => Err(malformed(error)),
        _ => Ok(models),
    }
}

fn encode_collection<M: Model>(models: &[M]) -> Result<Vec<u8>, StorageError> {
    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    models
        .serialize(&mut serializer)
        .map_err(|e| StorageError::Malformed {
            collection: M::COLLECTION.to_string(),
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

pub use in_memory::InMemoryModelStore;
pub use json_file::JsonFileStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
