use crate::io::storage::{KeyValueStore, StorageError};
use crate::model::item::{ItemId, Mode, ToDoItem};
use crate::model::state::{AppState, Items};
use crate::ops::item_ops;

/// Key holding the JSON item map
pub const ITEMS_KEY: &str = "@toDos";
/// Key holding the active mode as a JSON boolean
pub const MODE_KEY: &str = "@lastState";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not decode {key}: {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    #[error("could not encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Answer to the delete prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Cancel,
    Ok,
}

/// Owns the to-do state and keeps it in step with storage.
///
/// Every mutation is built on a copy of the state, written out, and only
/// then swapped in. A failed write leaves the in-memory state as it was.
#[derive(Debug)]
pub struct ToDoStore<S: KeyValueStore> {
    storage: S,
    state: AppState,
}

impl<S: KeyValueStore> ToDoStore<S> {
    /// Open a store and load whatever `storage` holds.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let mut store = ToDoStore {
            storage,
            state: AppState::default(),
        };
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory state with what storage holds.
    /// Absent keys fall back to an empty list and Work mode.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let items: Items = match self.storage.get(ITEMS_KEY)? {
            Some(raw) => decode(ITEMS_KEY, &raw)?,
            None => Items::new(),
        };
        let mode = match self.storage.get(MODE_KEY)? {
            Some(raw) => decode(MODE_KEY, &raw)?,
            None => Mode::default(),
        };
        tracing::debug!(items = items.len(), %mode, "loaded state");
        self.state = AppState::new(mode, items);
        Ok(())
    }

    /// Write both keys from the in-memory state.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        write_state(&mut self.storage, &self.state, WriteOrder::ItemsLast)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Switch the active list.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), StoreError> {
        self.commit(|state| item_ops::set_mode(state, mode))?;
        tracing::info!(%mode, "mode set");
        Ok(())
    }

    /// Add an item to the active list. Empty text is ignored (`Ok(None)`).
    pub fn add_item(&mut self, text: &str) -> Result<Option<ItemId>, StoreError> {
        self.add_item_at(text, item_ops::now_millis())
    }

    /// `add_item` with an explicit creation time
    pub fn add_item_at(
        &mut self,
        text: &str,
        now_millis: u64,
    ) -> Result<Option<ItemId>, StoreError> {
        if text.is_empty() {
            return Ok(None);
        }
        let id = self.commit(|state| item_ops::add_item(state, text, now_millis))?;
        if let Some(id) = id {
            tracing::info!(%id, mode = %self.state.mode, "item added");
        }
        Ok(id)
    }

    /// Delete an item once `confirm` agrees. `confirm` is only asked about
    /// ids that exist. Returns the removed item.
    pub fn delete_item<F>(&mut self, id: ItemId, confirm: F) -> Result<Option<ToDoItem>, StoreError>
    where
        F: FnOnce(&ToDoItem) -> Confirmation,
    {
        let Some(item) = self.state.items.get(&id) else {
            return Ok(None);
        };
        if confirm(item) == Confirmation::Cancel {
            return Ok(None);
        }
        let removed = self.commit(|state| item_ops::delete_item(state, id))?;
        tracing::info!(%id, "item deleted");
        Ok(removed)
    }

    /// Flip completion. Returns the new value; unknown ids are ignored.
    pub fn toggle_complete(&mut self, id: ItemId) -> Result<Option<bool>, StoreError> {
        if !self.state.items.contains_key(&id) {
            return Ok(None);
        }
        let completed = self.commit(|state| item_ops::toggle_complete(state, id))?;
        tracing::info!(%id, ?completed, "item toggled");
        Ok(completed)
    }

    /// Replace an item's text. Empty text and unknown ids are ignored.
    pub fn edit_item(&mut self, id: ItemId, text: &str) -> Result<bool, StoreError> {
        if text.is_empty() || !self.state.items.contains_key(&id) {
            return Ok(false);
        }
        let changed = self.commit(|state| item_ops::edit_item(state, id, text))?;
        tracing::info!(%id, "item edited");
        Ok(changed)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn items(&self) -> &Items {
        &self.state.items
    }

    pub fn get(&self, id: ItemId) -> Option<&ToDoItem> {
        self.state.items.get(&id)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = (ItemId, &ToDoItem)> {
        self.state.visible_items()
    }

    pub fn items_in(&self, mode: Mode) -> impl Iterator<Item = (ItemId, &ToDoItem)> {
        self.state.items_in(mode)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Apply `f` to a copy of the state, write the copy, then keep it.
    fn commit<T>(&mut self, f: impl FnOnce(&mut AppState) -> T) -> Result<T, StoreError> {
        let mut next = self.state.clone();
        let out = f(&mut next);
        let order = if next.mode != self.state.mode {
            WriteOrder::ModeLast
        } else {
            WriteOrder::ItemsLast
        };
        write_state(&mut self.storage, &next, order)?;
        self.state = next;
        Ok(out)
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &'static str, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Decode { key, source })
}

/// Which key goes to storage second.
///
/// The key a mutation changed is written last. The first write then only
/// repeats what is already stored, so a failure on either write leaves the
/// stored pair as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteOrder {
    ItemsLast,
    ModeLast,
}

fn write_state<S: KeyValueStore + ?Sized>(
    storage: &mut S,
    state: &AppState,
    order: WriteOrder,
) -> Result<(), StoreError> {
    let items = serde_json::to_string(&state.items)?;
    let mode = serde_json::to_string(&state.mode)?;
    match order {
        WriteOrder::ItemsLast => {
            storage.set(MODE_KEY, &mode)?;
            storage.set(ITEMS_KEY, &items)?;
        }
        WriteOrder::ModeLast => {
            storage.set(ITEMS_KEY, &items)?;
            storage.set(MODE_KEY, &mode)?;
        }
    }
    tracing::debug!(items_bytes = items.len(), mode = %state.mode, "persisted state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStore;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn empty_store() -> ToDoStore<MemoryStore> {
        ToDoStore::open(MemoryStore::new()).unwrap()
    }

    /// Parse the persisted item blob back into a map.
    fn persisted_items(store: &ToDoStore<MemoryStore>) -> Items {
        serde_json::from_str(store.storage().raw(ITEMS_KEY).unwrap()).unwrap()
    }

    #[test]
    fn first_run_defaults() {
        let store = empty_store();
        assert_eq!(store.mode(), Mode::Work);
        assert!(store.items().is_empty());
        assert_eq!(store.storage().raw(ITEMS_KEY), None);
    }

    #[test]
    fn add_grows_by_one_in_current_mode() {
        let mut store = empty_store();
        store.set_mode(Mode::Travel).unwrap();
        let id = store.add_item("book flight").unwrap().unwrap();
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.get(id).unwrap().mode, Mode::Travel);
        assert_eq!(persisted_items(&store), *store.items());
    }

    #[test]
    fn add_empty_does_not_write() {
        let mut store = empty_store();
        assert_eq!(store.add_item("").unwrap(), None);
        assert!(store.items().is_empty());
        assert_eq!(store.storage().raw(ITEMS_KEY), None);
    }

    #[test]
    fn set_mode_writes_both_keys() {
        let mut store = empty_store();
        store.set_mode(Mode::Travel).unwrap();
        assert_eq!(store.storage().raw(MODE_KEY), Some("false"));
        assert_eq!(store.storage().raw(ITEMS_KEY), Some("{}"));
    }

    #[test]
    fn set_mode_keeps_item_modes() {
        let mut store = empty_store();
        let id = store.add_item_at("buy milk", 10).unwrap().unwrap();
        store.set_mode(Mode::Travel).unwrap();
        store.set_mode(Mode::Work).unwrap();
        store.set_mode(Mode::Travel).unwrap();
        assert_eq!(store.get(id).unwrap().mode, Mode::Work);
    }

    #[test]
    fn delete_cancel_keeps_items() {
        let mut store = empty_store();
        let id = store.add_item_at("buy milk", 10).unwrap().unwrap();
        let before = store.items().clone();
        let removed = store.delete_item(id, |_| Confirmation::Cancel).unwrap();
        assert_eq!(removed, None);
        assert_eq!(*store.items(), before);
    }

    #[test]
    fn delete_ok_removes_exactly_that_key() {
        let mut store = empty_store();
        let keep = store.add_item_at("buy milk", 10).unwrap().unwrap();
        let gone = store.add_item_at("send report", 11).unwrap().unwrap();
        let removed = store.delete_item(gone, |_| Confirmation::Ok).unwrap();
        assert_eq!(removed.unwrap().text, "send report");
        let ids: Vec<ItemId> = store.items().keys().copied().collect();
        assert_eq!(ids, vec![keep]);
        assert_eq!(persisted_items(&store), *store.items());
    }

    #[test]
    fn delete_unknown_id_never_prompts() {
        let mut store = empty_store();
        let removed = store
            .delete_item(ItemId(99), |_| panic!("prompted for a missing item"))
            .unwrap();
        assert_eq!(removed, None);
    }

    #[test]
    fn toggle_twice_round_trips_and_persists() {
        let mut store = empty_store();
        let id = store.add_item_at("buy milk", 10).unwrap().unwrap();
        assert_eq!(store.toggle_complete(id).unwrap(), Some(true));
        assert!(persisted_items(&store)[&id].completed);
        assert_eq!(store.toggle_complete(id).unwrap(), Some(false));
        assert!(!persisted_items(&store)[&id].completed);
    }

    #[test]
    fn toggle_unknown_id_is_silent() {
        let mut store = empty_store();
        assert_eq!(store.toggle_complete(ItemId(5)).unwrap(), None);
        assert_eq!(store.storage().raw(ITEMS_KEY), None);
    }

    #[test]
    fn edit_persists_new_text() {
        let mut store = empty_store();
        let id = store.add_item_at("buy milk", 10).unwrap().unwrap();
        assert!(store.edit_item(id, "buy oat milk").unwrap());
        assert_eq!(persisted_items(&store)[&id].text, "buy oat milk");
        assert!(!store.edit_item(id, "").unwrap());
        assert!(!store.edit_item(ItemId(1), "x").unwrap());
    }

    #[test]
    fn failed_write_rolls_back() {
        let mut store = empty_store();
        let id = store.add_item_at("buy milk", 10).unwrap().unwrap();
        let before = store.state().clone();
        store.storage_mut().fail_writes = true;

        assert!(store.add_item_at("book flight", 11).is_err());
        assert!(store.toggle_complete(id).is_err());
        assert!(store.set_mode(Mode::Travel).is_err());
        assert!(store.delete_item(id, |_| Confirmation::Ok).is_err());

        assert_eq!(*store.state(), before);
    }

    /// Storage that refuses writes to one key
    struct RejectKey {
        inner: MemoryStore,
        key: &'static str,
    }

    impl KeyValueStore for RejectKey {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.key {
                return Err(StorageError::ReadOnly);
            }
            self.inner.set(key, value)
        }
    }

    fn store_rejecting(key: &'static str) -> ToDoStore<RejectKey> {
        let mut store = ToDoStore::open(RejectKey {
            inner: MemoryStore::new(),
            key: "",
        })
        .unwrap();
        store.add_item_at("buy milk", 10).unwrap();
        store.storage_mut().key = key;
        store
    }

    fn reopened(store: &ToDoStore<RejectKey>) -> AppState {
        ToDoStore::open(store.storage().inner.clone())
            .unwrap()
            .state()
            .clone()
    }

    #[test]
    fn item_change_with_mode_key_failing_leaves_disk_alone() {
        let mut store = store_rejecting(MODE_KEY);
        let before = store.state().clone();

        assert!(store.add_item_at("book flight", 20).is_err());
        let id = ItemId(10);
        assert!(store.toggle_complete(id).is_err());
        assert!(store.edit_item(id, "buy oat milk").is_err());
        assert!(store.delete_item(id, |_| Confirmation::Ok).is_err());

        assert_eq!(*store.state(), before);
        assert_eq!(reopened(&store), before);
    }

    #[test]
    fn item_change_with_items_key_failing_leaves_disk_alone() {
        let mut store = store_rejecting(ITEMS_KEY);
        let before = store.state().clone();

        assert!(store.add_item_at("book flight", 20).is_err());
        assert_eq!(reopened(&store), before);
    }

    #[test]
    fn mode_change_with_either_key_failing_leaves_disk_alone() {
        for key in [MODE_KEY, ITEMS_KEY] {
            let mut store = store_rejecting(key);
            let before = store.state().clone();

            assert!(store.set_mode(Mode::Travel).is_err());
            assert_eq!(store.mode(), Mode::Work);
            assert_eq!(reopened(&store), before, "failing key {}", key);
        }
    }

    #[test]
    fn persist_rewrites_both_keys() {
        let storage = MemoryStore::with_entries([(ITEMS_KEY, "{}")]);
        let mut store = ToDoStore::open(storage).unwrap();
        assert_eq!(store.storage().raw(MODE_KEY), None);

        store.persist().unwrap();
        assert_eq!(store.storage().raw(ITEMS_KEY), Some("{}"));
        assert_eq!(store.storage().raw(MODE_KEY), Some("true"));
    }

    #[test]
    fn reload_reproduces_state() {
        let mut store = empty_store();
        let id = store.add_item_at("buy milk", 10).unwrap().unwrap();
        store.toggle_complete(id).unwrap();
        store.set_mode(Mode::Travel).unwrap();

        let reopened = ToDoStore::open(store.storage().clone()).unwrap();
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn loads_older_blobs_without_flags() {
        let storage = MemoryStore::with_entries([
            (ITEMS_KEY, r#"{"1650000000000":{"text":"pack","working":false}}"#),
            (MODE_KEY, "false"),
        ]);
        let store = ToDoStore::open(storage).unwrap();
        assert_eq!(store.mode(), Mode::Travel);
        let item = store.get(ItemId(1_650_000_000_000)).unwrap();
        assert_eq!(item.text, "pack");
        assert_eq!(item.mode, Mode::Travel);
        assert!(!item.completed);
    }

    #[test]
    fn undecodable_items_is_an_error() {
        let storage = MemoryStore::with_entries([(ITEMS_KEY, "not json")]);
        let err = ToDoStore::open(storage).unwrap_err();
        assert!(matches!(err, StoreError::Decode { key: ITEMS_KEY, .. }));
        assert!(err.to_string().starts_with("could not decode @toDos"));
    }

    #[test]
    fn null_blobs_are_errors_not_defaults() {
        let storage = MemoryStore::with_entries([(MODE_KEY, "null")]);
        assert!(matches!(
            ToDoStore::open(storage),
            Err(StoreError::Decode { key: MODE_KEY, .. })
        ));
    }

    #[test]
    fn stored_format() {
        let mut store = empty_store();
        store.add_item_at("buy milk", 1_700_000_000_000).unwrap();
        store.set_mode(Mode::Travel).unwrap();
        store.add_item_at("book flight", 1_700_000_000_001).unwrap();

        assert_snapshot!(store.storage().raw(ITEMS_KEY).unwrap(), @r#"{"1700000000000":{"text":"buy milk","working":true,"completed":false,"editting":false},"1700000000001":{"text":"book flight","working":false,"completed":false,"editting":false}}"#);
        assert_snapshot!(store.storage().raw(MODE_KEY).unwrap(), @"false");
    }
}
