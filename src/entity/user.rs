use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::display_prefix;
use crate::model::Model;

/// The `{title, author, item_id}` copy of an item kept on a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub title: String,
    pub author: String,
    pub item_id: String,
}

/// A library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id")]
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    borrowed_items: Vec<ItemSummary>,
    #[serde(default)]
    reserved_items: Vec<ItemSummary>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            borrowed_items: Vec::new(),
            reserved_items: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_id(&self) -> &str {
        display_prefix(&self.id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn borrowed_items(&self) -> &[ItemSummary] {
        &self.borrowed_items
    }

    pub fn reserved_items(&self) -> &[ItemSummary] {
        &self.reserved_items
    }

    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }

    pub fn borrows(&self, item_id: &str) -> bool {
        self.borrowed_items.iter().any(|s| s.item_id == item_id)
    }

    pub fn reserves(&self, item_id: &str) -> bool {
        self.reserved_items.iter().any(|s| s.item_id == item_id)
    }

    pub fn has_borrowed_title(&self, title: &str) -> bool {
        self.borrowed_items.iter().any(|s| s.title == title)
    }

    pub(crate) fn push_borrowed(&mut self, summary: ItemSummary) {
        self.borrowed_items.push(summary);
    }

    pub(crate) fn remove_borrowed(&mut self, item_id: &str) -> bool {
        let before = self.borrowed_items.len();
        self.borrowed_items.retain(|s| s.item_id != item_id);
        self.borrowed_items.len() != before
    }

    pub(crate) fn push_reserved(&mut self, summary: ItemSummary) {
        self.reserved_items.push(summary);
    }

    pub(crate) fn remove_reserved(&mut self, item_id: &str) -> bool {
        let before = self.reserved_items.len();
        self.reserved_items.retain(|s| s.item_id != item_id);
        self.reserved_items.len() != before
    }
}

impl Model for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}
