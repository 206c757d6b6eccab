//! Availability/reservation state machine.
//!
//! Each transition takes the item and the acting user, checks its guard and
//! either applies every change (item flags plus the user's summary list) and
//! returns `true`, or changes nothing and returns `false`.
//!
//! ```text
//!            reserve                 cancel_reservation
//!   Free ─────────────▶ Reserved(U) ────────────────────▶ Free
//!    │  ▲
//!    │  │ return_item
//!    ▼  │
//!   Borrowed
//! ```
//!
//! Magazines are not reservable and only move between `Free` and `Borrowed`.

use crate::entity::{Item, User};

/// Reserve `item` for `user`.
///
/// Requires the item to be reservable, available and not already reserved.
pub fn reserve(item: &mut Item, user: &mut User) -> bool {
    if !item.is_reservable() || !item.check_availability() || item.reserved_by().is_some() {
        return false;
    }

    item.set_reserved_by(Some(user.id().to_string()));
    item.set_available(false);
    user.push_reserved(item.summary());
    true
}

/// Cancel `user`'s reservation of `item`.
pub fn cancel_reservation(item: &mut Item, user: &mut User) -> bool {
    if item.reserved_by() != Some(user.id()) {
        return false;
    }

    item.set_reserved_by(None);
    item.set_available(true);
    user.remove_reserved(item.id());
    true
}

/// Lend `item` to `user`.
///
/// Requires the item to be available and the user not to hold another item
/// with the same title. A stale `reserved_by` is neither checked nor cleared.
pub fn borrow(item: &mut Item, user: &mut User) -> bool {
    if !item.check_availability() || user.has_borrowed_title(item.title()) {
        return false;
    }

    item.set_available(false);
    user.push_borrowed(item.summary());
    true
}

/// Take `item` back from `user`.
///
/// The guard matches on title, so any borrowed item with the same title lets
/// the return through. Only the summary carrying this item's id is removed,
/// and `reserved_by` is left untouched.
pub fn return_item(item: &mut Item, user: &mut User) -> bool {
    if !user.has_borrowed_title(item.title()) {
        return false;
    }

    item.set_available(true);
    user.remove_borrowed(item.id());
    true
}
