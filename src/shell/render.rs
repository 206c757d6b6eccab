use crate::aggregate::Catalogue;
use crate::entity::{Item, ItemKind};

pub const RULE: &str = "==============================";

/// Multi-line description of an item with its current status.
pub fn item_card(catalogue: &Catalogue, item: &Item) -> String {
    format!(
        "\n{}: {}\nAuthor: {}\nStatus: {}\nItem ID: {}",
        item.kind(),
        item.title(),
        item.author(),
        catalogue.render_status(item),
        item.display_id()
    )
}

pub fn kind_heading(kind: ItemKind, count: usize) -> String {
    if count == 0 {
        return format!("\nThere's no {kind} available!");
    }
    let plural = if count > 1 { "s" } else { "" };
    format!("\n{count} {kind}{plural} available:\n{RULE}")
}
