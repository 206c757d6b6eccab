pub mod aggregate;
pub mod config;
pub mod entity;
pub mod error;
pub mod lending;
pub mod model;
pub mod service;
pub mod shell;
pub mod validate;

pub use aggregate::Catalogue;
pub use config::Config;
pub use entity::{Item, ItemKind, ItemRecord, ItemState, ItemSummary, User};
pub use error::{CatalogueError, Relation};
pub use model::{
    InMemoryModelStore, JsonFileStore, Loaded, Model, ModelRepository, ModelStore, ModelsExt,
    StorageError,
};
pub use service::LibraryService;
pub use shell::Shell;
pub use validate::ValidationError;
