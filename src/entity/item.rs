use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::display_prefix;
use super::user::{ItemSummary, User};
use crate::model::Model;

/// The kind of a catalogue item.
///
/// Books and DVDs are reservable; magazines can only be borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Book,
    #[serde(rename = "DVD")]
    Dvd,
    Magazine,
}

impl ItemKind {
    /// Listing order used when grouping items by kind.
    pub const ALL: [ItemKind; 3] = [ItemKind::Book, ItemKind::Magazine, ItemKind::Dvd];

    pub fn is_reservable(self) -> bool {
        matches!(self, ItemKind::Book | ItemKind::Dvd)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Book => "Book",
            ItemKind::Dvd => "DVD",
            ItemKind::Magazine => "Magazine",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known item kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item kind: {0:?}")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "book" => Ok(ItemKind::Book),
            "dvd" => Ok(ItemKind::Dvd),
            "magazine" => Ok(ItemKind::Magazine),
            _ => Err(UnknownItemKind(s.trim().to_string())),
        }
    }
}

/// Where an item sits in the availability/reservation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState<'a> {
    Free,
    Reserved { by: &'a str },
    Borrowed,
}

/// A catalogue item.
///
/// Items (de)serialize through [`ItemRecord`], the flat shape stored in the
/// items file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    id: String,
    kind: ItemKind,
    title: String,
    author: String,
    available: bool,
    reserved_by: Option<String>,
}

impl Item {
    /// Create an available item with a freshly generated id.
    pub fn new(kind: ItemKind, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            author: author.into(),
            available: true,
            reserved_by: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The first 8 characters of the id, shown to people instead of the full id.
    pub fn display_id(&self) -> &str {
        display_prefix(&self.id)
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn check_availability(&self) -> bool {
        self.available
    }

    pub fn reserved_by(&self) -> Option<&str> {
        self.reserved_by.as_deref()
    }

    pub fn is_reservable(&self) -> bool {
        self.kind.is_reservable()
    }

    pub fn state(&self) -> ItemState<'_> {
        match (self.available, self.reserved_by.as_deref()) {
            (_, Some(by)) => ItemState::Reserved { by },
            (true, None) => ItemState::Free,
            (false, None) => ItemState::Borrowed,
        }
    }

    /// Same kind, title and author, ignoring letter case.
    pub fn same_listing(&self, kind: ItemKind, title: &str, author: &str) -> bool {
        self.kind == kind
            && self.title.to_lowercase() == title.to_lowercase()
            && self.author.to_lowercase() == author.to_lowercase()
    }

    /// The summary record a user keeps for this item.
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            title: self.title.clone(),
            author: self.author.clone(),
            item_id: self.id.clone(),
        }
    }

    pub fn to_record(&self) -> ItemRecord {
        ItemRecord::from(self.clone())
    }

    /// Human readable status, naming whoever borrows or reserves the item.
    ///
    /// Magazines never report a reserver.
    pub fn render_status(&self, users: &[User]) -> String {
        let mut status = if self.available {
            String::from("available")
        } else {
            String::from("not available")
        };

        if let Some(borrower) = users.iter().find(|user| user.borrows(&self.id)) {
            status.push_str(", borrowed by ");
            status.push_str(borrower.name());
        }

        if self.kind.is_reservable() {
            if let Some(reserver) = self
                .reserved_by
                .as_deref()
                .and_then(|by| users.iter().find(|user| user.id() == by))
            {
                status.push_str(", reserved by ");
                status.push_str(reserver.name());
            }
        }

        status
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub(crate) fn set_reserved_by(&mut self, user_id: Option<String>) {
        if self.kind.is_reservable() {
            self.reserved_by = user_id;
        }
    }
}

impl Model for Item {
    const COLLECTION: &'static str = "items";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Stored shape of an item.
///
/// `reserved_by` is written (possibly as `null`) for reservable kinds only,
/// and a missing `available` reads as `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub title: String,
    pub author: String,
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<Option<String>>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        let reserved_by = item.kind.is_reservable().then_some(item.reserved_by);
        ItemRecord {
            title: item.title,
            author: item.author,
            item_id: item.id,
            kind: item.kind,
            reserved_by,
            available: Some(item.available),
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let reserved_by = if record.kind.is_reservable() {
            record.reserved_by.flatten()
        } else {
            None
        };
        Item {
            id: record.item_id,
            kind: record.kind,
            title: record.title,
            author: record.author,
            available: record.available.unwrap_or(true),
            reserved_by,
        }
    }
}
