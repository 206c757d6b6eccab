//! Catalogue entities: items, users and the summary records that link them.

mod item;
mod user;

pub use item::{Item, ItemKind, ItemRecord, ItemState, UnknownItemKind};
pub use user::{ItemSummary, User};

/// Length of the id prefix shown to people.
pub const DISPLAY_ID_LEN: usize = 8;

pub(crate) fn display_prefix(id: &str) -> &str {
    id.get(..DISPLAY_ID_LEN).unwrap_or(id)
}
