//! Catalogue operations with persistence.
//!
//! A `LibraryService<S>` owns the [`Catalogue`] and the [`ModelStore`] it
//! was loaded from. Each operation applies a guarded transition in memory
//! and then rewrites the user collection followed by the item collection.
//!
//! There is no rollback: when a write fails the operation reports
//! [`CatalogueError::Storage`] but the in-memory change stays.
//!
//! ## Example
//!
//! ```ignore
//! use library_catalogue::{InMemoryModelStore, ItemKind, LibraryService};
//!
//! let (mut service, _issues) = LibraryService::open(InMemoryModelStore::new(), "12345");
//! let user = service.add_user("Ann", "ann@example.com")?;
//! let item = service.add_item(ItemKind::Book, "Dune", "Herbert")?;
//! service.borrow(user.id(), item.id())?;
//! ```

use tracing::{info, warn};

use crate::aggregate::Catalogue;
use crate::config::Config;
use crate::entity::{Item, ItemKind, User};
use crate::error::CatalogueError;
use crate::model::{JsonFileStore, ModelStore, ModelsExt, StorageError};
use crate::validate::{self, ValidationError};

pub struct LibraryService<S> {
    store: S,
    catalogue: Catalogue,
    admin_secret: String,
}

impl<S: ModelStore> LibraryService<S> {
    /// Load users and items from `store`.
    ///
    /// A collection that is missing, empty or malformed loads as empty; the
    /// reasons are logged and returned alongside the service.
    pub fn open(store: S, admin_secret: impl Into<String>) -> (Self, Vec<StorageError>) {
        let users = store.models::<User>().load_or_empty();
        let items = store.models::<Item>().load_or_empty();

        let issues: Vec<StorageError> = [users.issue, items.issue].into_iter().flatten().collect();
        for issue in &issues {
            warn!(%issue, "collection loaded as empty");
        }
        info!(
            users = users.models.len(),
            items = items.models.len(),
            "catalogue loaded"
        );

        let service = Self {
            store,
            catalogue: Catalogue::new(items.models, users.models),
            admin_secret: admin_secret.into(),
        };
        (service, issues)
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check the admin secret.
    pub fn authorize_admin(&self, secret: &str) -> Result<(), CatalogueError> {
        if secret.is_empty() {
            return Err(ValidationError::Empty { field: "password" }.into());
        }
        if secret != self.admin_secret {
            warn!("admin access denied");
            return Err(CatalogueError::AuthDenied);
        }
        Ok(())
    }

    /// Resolve a display id typed by a person to a user.
    pub fn find_user(&self, display_id: &str) -> Result<&User, CatalogueError> {
        let display_id = validate::display_id("user id", display_id)?;
        self.catalogue
            .find_user_by_display_id(&display_id)
            .ok_or(CatalogueError::UserNotFound(display_id))
    }

    /// Resolve a display id typed by a person to an item.
    pub fn find_item(&self, display_id: &str) -> Result<&Item, CatalogueError> {
        let display_id = validate::display_id("item id", display_id)?;
        self.catalogue
            .find_item_by_display_id(&display_id)
            .ok_or(CatalogueError::ItemNotFound(display_id))
    }

    pub fn borrow(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        self.catalogue.borrow(user_id, item_id)?;
        self.persist_pair(user_id, item_id)
    }

    pub fn return_item(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        self.catalogue.return_item(user_id, item_id)?;
        self.persist_pair(user_id, item_id)
    }

    pub fn reserve(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        self.catalogue.reserve(user_id, item_id)?;
        self.persist_pair(user_id, item_id)
    }

    pub fn cancel_reservation(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        self.catalogue.cancel_reservation(user_id, item_id)?;
        self.persist_pair(user_id, item_id)
    }

    pub fn add_item(
        &mut self,
        kind: ItemKind,
        title: &str,
        author: &str,
    ) -> Result<Item, CatalogueError> {
        let item = self.catalogue.add_item(kind, title, author)?;
        self.persist_items()?;
        Ok(item)
    }

    pub fn remove_item(
        &mut self,
        kind: ItemKind,
        title: &str,
        author: &str,
    ) -> Result<Item, CatalogueError> {
        let item = self.catalogue.remove_item(kind, title, author)?;
        self.persist_items()?;
        Ok(item)
    }

    pub fn add_user(&mut self, name: &str, email: &str) -> Result<User, CatalogueError> {
        let user = self.catalogue.add_user(name, email)?;
        self.persist_users()?;
        Ok(user)
    }

    pub fn remove_user(&mut self, user_id: &str) -> Result<User, CatalogueError> {
        let user = self.catalogue.remove_user(user_id)?;
        self.persist_users()?;
        Ok(user)
    }

    fn persist_pair(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        let user = self
            .catalogue
            .user(user_id)
            .cloned()
            .ok_or_else(|| CatalogueError::UserNotFound(user_id.to_string()))?;
        self.store
            .models::<User>()
            .update(self.catalogue.users_mut(), &user)
            .map_err(|e| save_failed("users", e))?;

        let item = self
            .catalogue
            .item(item_id)
            .cloned()
            .ok_or_else(|| CatalogueError::ItemNotFound(item_id.to_string()))?;
        self.store
            .models::<Item>()
            .update(self.catalogue.items_mut(), &item)
            .map_err(|e| save_failed("items", e))?;

        Ok(())
    }

    fn persist_users(&self) -> Result<(), CatalogueError> {
        self.store
            .models::<User>()
            .store(self.catalogue.users())
            .map_err(|e| save_failed("users", e))
    }

    fn persist_items(&self) -> Result<(), CatalogueError> {
        self.store
            .models::<Item>()
            .store(self.catalogue.items())
            .map_err(|e| save_failed("items", e))
    }
}

fn save_failed(collection: &str, error: StorageError) -> CatalogueError {
    warn!(collection, %error, "failed to save changes");
    CatalogueError::Storage(error)
}

impl LibraryService<JsonFileStore> {
    /// Open the JSON files named by `config`, creating missing ones first
    /// when `config.init` is set.
    pub fn from_config(config: &Config) -> Result<(Self, Vec<StorageError>), StorageError> {
        let store = config.store();
        if config.init {
            for created in [
                store.models::<User>().ensure()?,
                store.models::<Item>().ensure()?,
            ] {
                if created {
                    info!(dir = %store.dir().display(), "created empty collection file");
                }
            }
        }
        Ok(Self::open(store, config.admin_secret.clone()))
    }
}
