use std::fmt;

use crate::entity::ItemKind;
use crate::model::StorageError;
use crate::validate::ValidationError;

/// How a user holds an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Borrowed,
    Reserved,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Borrowed => f.write_str("borrowed"),
            Relation::Reserved => f.write_str("reserved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("email {0} is already linked with another user")]
    DuplicateEmail(String),

    #[error("{kind} {title:?} by {author} already exists")]
    DuplicateItem {
        kind: ItemKind,
        title: String,
        author: String,
    },

    #[error("user {0} doesn't exist")]
    UserNotFound(String),

    #[error("item {0} doesn't exist")]
    ItemNotFound(String),

    #[error("{title} is {}", unavailable_status(.borrowed_by, .reserved_by))]
    Unavailable {
        title: String,
        borrowed_by: Option<String>,
        reserved_by: Option<String>,
    },

    #[error("you can't reserve a {kind}")]
    UnsupportedOperation { kind: ItemKind },

    #[error("{user} has not borrowed {title}")]
    NotBorrowed { user: String, title: String },

    #[error("{title} is not reserved by {user}")]
    NotReserved { user: String, title: String },

    #[error("cannot remove item {title}: it is {relation} by {holder}")]
    ItemInUse {
        title: String,
        holder: String,
        relation: Relation,
    },

    #[error("cannot remove user {name}: they have {count} {relation} item(s)")]
    UserHasItems {
        name: String,
        count: usize,
        relation: Relation,
    },

    #[error("wrong admin password")]
    AuthDenied,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn unavailable_status(borrowed_by: &Option<String>, reserved_by: &Option<String>) -> String {
    let mut status = String::from("not available");
    if let Some(name) = borrowed_by {
        status.push_str(", borrowed by ");
        status.push_str(name);
    }
    if let Some(name) = reserved_by {
        status.push_str(", reserved by ");
        status.push_str(name);
    }
    status
}

impl CatalogueError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogueError::UserNotFound(_) | CatalogueError::ItemNotFound(_)
        )
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, CatalogueError::Storage(_))
    }
}
