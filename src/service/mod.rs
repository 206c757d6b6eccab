//! Library service: the catalogue bound to a model store.
//!
//! `LibraryService<S>` is what the interactive shell talks to. It loads
//! users and items through [`ModelStore`](crate::model::ModelStore), runs
//! the guarded operations on the in-memory [`Catalogue`](crate::Catalogue)
//! and writes both collections back after every successful mutation.

mod library_service;

pub use library_service::LibraryService;
