use crate::model::item::{ItemId, Mode, ToDoItem};
use crate::model::state::{AppState, Items};

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Pick an id for an item created at `now_millis`.
///
/// The timestamp is used as-is unless it is already taken, in which case the
/// next free value above it is used.
pub fn next_id(items: &Items, now_millis: u64) -> ItemId {
    let mut candidate = now_millis;
    while items.contains_key(&ItemId(candidate)) {
        candidate += 1;
    }
    ItemId(candidate)
}

/// Current time in Unix milliseconds
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Switch the active list. Items are untouched.
pub fn set_mode(state: &mut AppState, mode: Mode) {
    state.mode = mode;
}

/// Append an item to the active list. Empty text is ignored.
pub fn add_item(state: &mut AppState, text: &str, now_millis: u64) -> Option<ItemId> {
    if text.is_empty() {
        return None;
    }
    let id = next_id(&state.items, now_millis);
    state.items.insert(id, ToDoItem::new(text, state.mode));
    Some(id)
}

/// Remove an item, keeping the order of the rest
pub fn delete_item(state: &mut AppState, id: ItemId) -> Option<ToDoItem> {
    state.items.shift_remove(&id)
}

/// Flip completion. Returns the new value, or None if the id is unknown.
pub fn toggle_complete(state: &mut AppState, id: ItemId) -> Option<bool> {
    let item = state.items.get_mut(&id)?;
    item.completed = !item.completed;
    Some(item.completed)
}

/// Replace an item's text and leave editing. Empty text is ignored.
pub fn edit_item(state: &mut AppState, id: ItemId, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    match state.items.get_mut(&id) {
        Some(item) => {
            item.text = text.to_string();
            item.editing = false;
            true
        }
        None => false,
    }
}
