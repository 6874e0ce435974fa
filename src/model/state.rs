use indexmap::IndexMap;

use super::item::{ItemId, Mode, ToDoItem};

/// The item collection, in insertion order
pub type Items = IndexMap<ItemId, ToDoItem>;

/// Everything the store persists: the active list and all items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub mode: Mode,
    pub items: Items,
}

impl AppState {
    pub fn new(mode: Mode, items: Items) -> Self {
        AppState { mode, items }
    }

    /// Items belonging to `mode`, in display order
    pub fn items_in(&self, mode: Mode) -> impl Iterator<Item = (ItemId, &ToDoItem)> {
        self.items
            .iter()
            .filter(move |(_, item)| item.mode == mode)
            .map(|(id, item)| (*id, item))
    }

    /// Items of the active list, in display order
    pub fn visible_items(&self) -> impl Iterator<Item = (ItemId, &ToDoItem)> {
        self.items_in(self.mode)
    }

    pub fn count_in(&self, mode: Mode) -> usize {
        self.items.values().filter(|item| item.mode == mode).count()
    }
}
