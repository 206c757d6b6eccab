//! ModelRepository - Typed accessor for whole-collection model operations.

use std::marker::PhantomData;

use super::{Loaded, Model, ModelStore, StorageError};

/// Typed repository wrapper for accessing models of a specific type.
pub struct ModelRepository<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: ModelStore, M: Model> ModelRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Load the whole collection.
    pub fn load(&self) -> Result<Vec<M>, StorageError> {
        self.store.load_models()
    }

    /// Load the whole collection, treating any failure as "no records".
    pub fn load_or_empty(&self) -> Loaded<M> {
        match self.load() {
            Ok(models) => Loaded {
                models,
                issue: None,
            },
            Err(issue) => Loaded {
                models: Vec::new(),
                issue: Some(issue),
            },
        }
    }

    /// Rewrite the whole collection.
    pub fn store(&self, models: &[M]) -> Result<(), StorageError> {
        self.store.store_models(models)
    }

    /// Replace the record with `model`'s id inside `models`, then rewrite
    /// the whole collection.
    pub fn update(&self, models: &mut [M], model: &M) -> Result<(), StorageError> {
        let slot = models
            .iter_mut()
            .find(|existing| existing.id() == model.id())
            .ok_or_else(|| StorageError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            })?;
        *slot = model.clone();
        self.store(models)
    }

    /// Create the collection if it does not exist yet.
    pub fn ensure(&self) -> Result<bool, StorageError> {
        self.store.ensure_collection::<M>()
    }
}

/// Extension trait for typed model access on any ModelStore.
pub trait ModelsExt: ModelStore + Sized {
    /// Get a typed model repository.
    fn models<M: Model>(&self) -> ModelRepository<'_, Self, M> {
        ModelRepository::new(self)
    }
}

impl<S: ModelStore> ModelsExt for S {}
