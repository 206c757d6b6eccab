use tracing::{debug, info};

use crate::entity::{Item, ItemKind, User};
use crate::error::{CatalogueError, Relation};
use crate::lending;
use crate::validate;

/// The owned item and user collections.
///
/// Both lists are private; every change goes through one of the guarded
/// operations below, which keep the item flags and the users' summary lists
/// in step.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    items: Vec<Item>,
    users: Vec<User>,
}

impl Catalogue {
    pub fn new(items: Vec<Item>, users: Vec<User>) -> Self {
        Self { items, users }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub(crate) fn users_mut(&mut self) -> &mut [User] {
        &mut self.users
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id() == user_id)
    }

    /// First user whose id starts with `prefix`.
    pub fn find_user_by_display_id(&self, prefix: &str) -> Option<&User> {
        let found = self.users.iter().find(|user| user.id().starts_with(prefix));
        debug!(prefix, found = found.is_some(), "user lookup");
        found
    }

    /// First item whose id starts with `prefix`.
    pub fn find_item_by_display_id(&self, prefix: &str) -> Option<&Item> {
        let found = self.items.iter().find(|item| item.id().starts_with(prefix));
        debug!(prefix, found = found.is_some(), "item lookup");
        found
    }

    /// Available items grouped by kind, in listing order. Kinds with nothing
    /// available are kept with an empty list.
    pub fn available_items(&self) -> Vec<(ItemKind, Vec<&Item>)> {
        ItemKind::ALL
            .iter()
            .map(|&kind| {
                let items: Vec<&Item> = self
                    .items
                    .iter()
                    .filter(|item| item.kind() == kind && item.check_availability())
                    .collect();
                (kind, items)
            })
            .collect()
    }

    /// Items whose lower-cased title starts with the query, or contains it
    /// once the query is longer than two characters.
    pub fn search_by_title(&self, query: &str) -> Vec<&Item> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                let title = item.title().to_lowercase();
                title.starts_with(&query) || (query.chars().count() > 2 && title.contains(&query))
            })
            .collect()
    }

    pub fn search_by_type(&self, query: &str) -> Vec<&Item> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| item.kind().as_str().to_lowercase() == query)
            .collect()
    }

    pub fn render_status(&self, item: &Item) -> String {
        item.render_status(&self.users)
    }

    /// Who borrows and who reserves the item, found by scanning every user.
    pub fn holders(&self, item_id: &str) -> (Option<&User>, Option<&User>) {
        let borrower = self.users.iter().find(|user| user.borrows(item_id));
        let reserver = self
            .item(item_id)
            .and_then(Item::reserved_by)
            .and_then(|by| self.user(by));
        (borrower, reserver)
    }

    fn unavailable(&self, item_id: &str) -> CatalogueError {
        let (borrower, reserver) = self.holders(item_id);
        CatalogueError::Unavailable {
            title: self
                .item(item_id)
                .map(|item| item.title().to_string())
                .unwrap_or_default(),
            borrowed_by: borrower.map(|user| user.name().to_string()),
            reserved_by: reserver.map(|user| user.name().to_string()),
        }
    }

    fn pair_mut(
        &mut self,
        user_id: &str,
        item_id: &str,
    ) -> Result<(&mut User, &mut Item), CatalogueError> {
        let user = self
            .users
            .iter_mut()
            .find(|user| user.id() == user_id)
            .ok_or_else(|| CatalogueError::UserNotFound(user_id.to_string()))?;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| CatalogueError::ItemNotFound(item_id.to_string()))?;
        Ok((user, item))
    }

    pub fn borrow(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        let (user, item) = self.pair_mut(user_id, item_id)?;
        if lending::borrow(item, user) {
            info!(user = user.name(), item = item.title(), "item borrowed");
            return Ok(());
        }
        Err(self.unavailable(item_id))
    }

    pub fn return_item(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        let (user, item) = self.pair_mut(user_id, item_id)?;
        if lending::return_item(item, user) {
            info!(user = user.name(), item = item.title(), "item returned");
            return Ok(());
        }
        Err(CatalogueError::NotBorrowed {
            user: user.name().to_string(),
            title: item.title().to_string(),
        })
    }

    pub fn reserve(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        let (user, item) = self.pair_mut(user_id, item_id)?;
        if !item.is_reservable() {
            return Err(CatalogueError::UnsupportedOperation { kind: item.kind() });
        }
        if lending::reserve(item, user) {
            info!(user = user.name(), item = item.title(), "item reserved");
            return Ok(());
        }
        Err(self.unavailable(item_id))
    }

    pub fn cancel_reservation(&mut self, user_id: &str, item_id: &str) -> Result<(), CatalogueError> {
        let (user, item) = self.pair_mut(user_id, item_id)?;
        if lending::cancel_reservation(item, user) {
            info!(user = user.name(), item = item.title(), "reservation cancelled");
            return Ok(());
        }
        Err(CatalogueError::NotReserved {
            user: user.name().to_string(),
            title: item.title().to_string(),
        })
    }

    /// Add a new available item unless the same kind, title and author is
    /// already listed (ignoring case).
    pub fn add_item(
        &mut self,
        kind: ItemKind,
        title: &str,
        author: &str,
    ) -> Result<Item, CatalogueError> {
        let title = validate::non_empty("item title", title)?;
        let author = validate::non_empty("item author", author)?;

        if self
            .items
            .iter()
            .any(|item| item.same_listing(kind, &title, &author))
        {
            return Err(CatalogueError::DuplicateItem {
                kind,
                title,
                author,
            });
        }

        let item = Item::new(kind, title, author);
        info!(kind = %kind, title = item.title(), id = item.display_id(), "item added");
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove the item matching kind, title and author (ignoring case),
    /// unless someone reserves or borrows it.
    pub fn remove_item(
        &mut self,
        kind: ItemKind,
        title: &str,
        author: &str,
    ) -> Result<Item, CatalogueError> {
        let index = self
            .items
            .iter()
            .position(|item| item.same_listing(kind, title.trim(), author.trim()))
            .ok_or_else(|| CatalogueError::ItemNotFound(title.trim().to_string()))?;

        let item = &self.items[index];
        for user in &self.users {
            let relation = if item.reserved_by() == Some(user.id()) || user.reserves(item.id()) {
                Some(Relation::Reserved)
            } else if user.borrows(item.id()) {
                Some(Relation::Borrowed)
            } else {
                None
            };

            if let Some(relation) = relation {
                return Err(CatalogueError::ItemInUse {
                    title: item.title().to_string(),
                    holder: user.name().to_string(),
                    relation,
                });
            }
        }

        let removed = self.items.remove(index);
        info!(title = removed.title(), id = removed.display_id(), "item removed");
        Ok(removed)
    }

    /// Register a user unless the email is already taken (ignoring case).
    pub fn add_user(&mut self, name: &str, email: &str) -> Result<User, CatalogueError> {
        let email = validate::email(email)?;
        let name = validate::non_empty("name", name)?;

        if self.users.iter().any(|user| user.email_matches(&email)) {
            return Err(CatalogueError::DuplicateEmail(email));
        }

        let user = User::new(name, email);
        info!(name = user.name(), id = user.display_id(), "user added");
        self.users.push(user.clone());
        Ok(user)
    }

    /// Remove a user who holds nothing.
    pub fn remove_user(&mut self, user_id: &str) -> Result<User, CatalogueError> {
        let index = self
            .users
            .iter()
            .position(|user| user.id() == user_id)
            .ok_or_else(|| CatalogueError::UserNotFound(user_id.to_string()))?;

        let user = &self.users[index];
        for (held, relation) in [
            (user.borrowed_items(), Relation::Borrowed),
            (user.reserved_items(), Relation::Reserved),
        ] {
            if !held.is_empty() {
                return Err(CatalogueError::UserHasItems {
                    name: user.name().to_string(),
                    count: held.len(),
                    relation,
                });
            }
        }

        let removed = self.users.remove(index);
        info!(name = removed.name(), id = removed.display_id(), "user removed");
        Ok(removed)
    }
}
