//! ModelStore - Abstract whole-collection storage for models.

use super::{Model, StorageError};

/// Abstract whole-collection storage for models.
pub trait ModelStore {
    /// Load every record of `M`'s collection.
    ///
    /// A missing, empty or malformed collection is an error of the matching
    /// [`StorageError`] kind.
    fn load_models<M: Model>(&self) -> Result<Vec<M>, StorageError>;

    /// Replace `M`'s collection with `models`.
    fn store_models<M: Model>(&self, models: &[M]) -> Result<(), StorageError>;

    /// Create `M`'s collection as an empty array if it does not exist yet.
    /// Returns true when something was created.
    fn ensure_collection<M: Model>(&self) -> Result<bool, StorageError>;
}
