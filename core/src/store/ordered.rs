use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::chain::Chain;
use super::item::Item;
use crate::dirty::DirtyFlag;
use crate::error::StoreError;
use crate::ids::IdGenerator;

pub const DEFAULT_MAX_ITEMS: usize = 1000;
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1000;

/// Per-list bounds. Text length is measured in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_items: usize,
    pub max_text_length: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

/// One list's items in user-defined order.
///
/// Every operation takes the store's mutex for its whole duration, reads
/// included, so each call observes and leaves a single consistent chain.
/// Successful mutations mark the shared dirty flag.
pub struct OrderedItemStore {
    chain: Mutex<Chain>,
    limits: StoreLimits,
    dirty: DirtyFlag,
    ids: Arc<dyn IdGenerator>,
}

impl OrderedItemStore {
    pub fn new(limits: StoreLimits, dirty: DirtyFlag, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            chain: Mutex::new(Chain::default()),
            limits,
            dirty,
            ids,
        }
    }

    /// Rebuilds a store from items in head-to-tail order.
    ///
    /// Rejects empty and repeated ids. Limits are not applied to restored
    /// data, and the dirty flag is left alone.
    pub fn from_items(
        items: impl IntoIterator<Item = Item>,
        limits: StoreLimits,
        dirty: DirtyFlag,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, StoreError> {
        let mut chain = Chain::default();
        for item in items {
            if item.id.is_empty() {
                return Err(StoreError::EmptyId);
            }
            if chain.key_of(&item.id).is_some() {
                return Err(StoreError::DuplicateId(item.id));
            }
            chain.push_back(item);
        }
        Ok(Self {
            chain: Mutex::new(chain),
            limits,
            dirty,
            ids,
        })
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.chain.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an item at the end of the list and returns its id.
    ///
    /// An absent or empty `id` gets a generated one.
    pub fn add_item(
        &self,
        text: impl Into<String>,
        id: Option<String>,
    ) -> Result<String, StoreError> {
        let text = text.into();
        let mut chain = self.chain.lock();
        if chain.len() >= self.limits.max_items {
            return Err(StoreError::CapacityExceeded {
                max: self.limits.max_items,
            });
        }
        self.check_text(&text)?;

        let id = match id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => self.ids.generate().map_err(StoreError::IdGeneration)?,
        };
        if chain.key_of(&id).is_some() {
            return Err(StoreError::DuplicateId(id));
        }

        chain.push_back(Item::new(id.clone(), text));
        self.dirty.mark();
        Ok(id)
    }

    pub fn edit_item(&self, id: &str, text: impl Into<String>) -> Result<(), StoreError> {
        let text = text.into();
        self.check_text(&text)?;

        let mut chain = self.chain.lock();
        let item = chain
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.text = text;
        self.dirty.mark();
        Ok(())
    }

    pub fn delete_item(&self, id: &str) -> Result<(), StoreError> {
        let mut chain = self.chain.lock();
        chain
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.dirty.mark();
        Ok(())
    }

    /// Places `id` immediately after `location`. Moving an item relative to
    /// itself changes nothing.
    pub fn move_item_after(&self, id: &str, location: &str) -> Result<(), StoreError> {
        self.relocate(id, location, Chain::move_after)
    }

    /// Places `id` immediately before `location`. Moving an item relative to
    /// itself changes nothing.
    pub fn move_item_before(&self, id: &str, location: &str) -> Result<(), StoreError> {
        self.relocate(id, location, Chain::move_before)
    }

    pub fn get_item(&self, id: &str) -> Option<Item> {
        self.chain.lock().get(id).cloned()
    }

    /// Items from first to last.
    pub fn list_all(&self) -> Vec<Item> {
        self.chain.lock().iter().cloned().collect()
    }

    /// Items from last to first.
    pub fn list_all_reverse(&self) -> Vec<Item> {
        self.chain.lock().iter_rev().cloned().collect()
    }

    fn relocate(
        &self,
        id: &str,
        location: &str,
        splice: fn(&mut Chain, usize, usize),
    ) -> Result<(), StoreError> {
        let mut chain = self.chain.lock();
        let key = chain
            .key_of(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let anchor = chain
            .key_of(location)
            .ok_or_else(|| StoreError::NotFound(location.to_string()))?;
        if key == anchor {
            return Ok(());
        }
        splice(&mut *chain, key, anchor);
        self.dirty.mark();
        Ok(())
    }

    fn check_text(&self, text: &str) -> Result<(), StoreError> {
        if text.len() > self.limits.max_text_length {
            return Err(StoreError::TextTooLong {
                len: text.len(),
                max: self.limits.max_text_length,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for OrderedItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedItemStore")
            .field("len", &self.len())
            .field("limits", &self.limits)
            .finish()
    }
}

/// Serializes as a JSON array of items in list order; `[]` when empty.
impl Serialize for OrderedItemStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let chain = self.chain.lock();
        let mut seq = serializer.serialize_seq(Some(chain.len()))?;
        for item in chain.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::default_generator;
    use pretty_assertions::assert_eq;

    struct FailingGenerator;

    impl IdGenerator for FailingGenerator {
        fn generate(&self) -> Result<String, String> {
            Err("entropy source unavailable".to_string())
        }
    }

    fn new_store(limits: StoreLimits) -> OrderedItemStore {
        OrderedItemStore::new(limits, DirtyFlag::new(), default_generator())
    }

    fn create_test_store(count: usize) -> OrderedItemStore {
        let store = new_store(StoreLimits::default());
        for i in 0..count {
            store.add_item(i.to_string(), Some(i.to_string())).unwrap();
        }
        store
    }

    fn texts(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.text.as_str()).collect()
    }

    /// Checks forward order, the reverse walk, and the link invariant.
    fn assert_order(store: &OrderedItemStore, expected: &[&str]) {
        store.chain.lock().assert_consistent();
        assert_eq!(texts(&store.list_all()), expected);
        let mut reversed = expected.to_vec();
        reversed.reverse();
        assert_eq!(texts(&store.list_all_reverse()), reversed);
    }

    #[test]
    fn test_add_preserves_call_order() {
        let store = new_store(StoreLimits::default());
        let mut expected = Vec::new();
        for word in ["milk", "eggs", "bread", "butter"] {
            store.add_item(word, None).unwrap();
            expected.push(word);
            assert_order(&store, &expected);
        }
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_add_generates_id_when_missing_or_empty() {
        let store = new_store(StoreLimits::default());
        let generated = store.add_item("a", None).unwrap();
        let from_empty = store.add_item("b", Some(String::new())).unwrap();
        let supplied = store.add_item("c", Some("my-id".into())).unwrap();

        assert_eq!(generated.len(), 36);
        assert_eq!(from_empty.len(), 36);
        assert_ne!(generated, from_empty);
        assert_eq!(supplied, "my-id");
        assert_eq!(store.get_item("my-id"), Some(Item::new("my-id", "c")));
    }

    #[test]
    fn test_add_rejects_duplicate_supplied_id() {
        let store = create_test_store(3);
        let err = store.add_item("again", Some("1".into())).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("1".into()));
        assert_order(&store, &["0", "1", "2"]);
    }

    #[test]
    fn test_add_beyond_capacity_leaves_store_unchanged() {
        let store = new_store(StoreLimits {
            max_items: 2,
            max_text_length: 10,
        });
        store.add_item("a", Some("a".into())).unwrap();
        store.add_item("b", Some("b".into())).unwrap();

        let err = store.add_item("c", Some("c".into())).unwrap_err();
        assert_eq!(err, StoreError::CapacityExceeded { max: 2 });
        assert_order(&store, &["a", "b"]);
    }

    #[test]
    fn test_text_length_limit_on_add_and_edit() {
        let store = new_store(StoreLimits {
            max_items: 10,
            max_text_length: 5,
        });
        store.add_item("12345", Some("x".into())).unwrap();

        let err = store.add_item("123456", None).unwrap_err();
        assert_eq!(err, StoreError::TextTooLong { len: 6, max: 5 });

        let err = store.edit_item("x", "123456").unwrap_err();
        assert_eq!(err, StoreError::TextTooLong { len: 6, max: 5 });

        assert_eq!(store.list_all(), vec![Item::new("x", "12345")]);
    }

    #[test]
    fn test_add_reports_id_generation_failure() {
        let dirty = DirtyFlag::new();
        let store =
            OrderedItemStore::new(StoreLimits::default(), dirty.clone(), Arc::new(FailingGenerator));

        let err = store.add_item("text", None).unwrap_err();
        assert!(matches!(err, StoreError::IdGeneration(_)));
        assert!(store.is_empty());
        assert!(!dirty.is_dirty());

        // Supplied ids never touch the generator.
        store.add_item("text", Some("given".into())).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_edit_replaces_text_in_place() {
        let store = create_test_store(3);
        store.edit_item("1", "one").unwrap();
        assert_order(&store, &["0", "one", "2"]);
    }

    #[test]
    fn test_missing_ids_report_not_found() {
        let store = create_test_store(3);
        let dirty_before = store.dirty.take();
        assert!(dirty_before);

        assert_eq!(
            store.edit_item("nope", "x"),
            Err(StoreError::NotFound("nope".into()))
        );
        assert_eq!(
            store.delete_item("nope"),
            Err(StoreError::NotFound("nope".into()))
        );
        assert_eq!(
            store.move_item_after("nope", "1"),
            Err(StoreError::NotFound("nope".into()))
        );
        assert_eq!(
            store.move_item_before("1", "nope"),
            Err(StoreError::NotFound("nope".into()))
        );

        assert!(!store.dirty.is_dirty());
        assert_order(&store, &["0", "1", "2"]);
    }

    #[test]
    fn test_move_item_after() {
        let store = create_test_store(7);
        store.move_item_after("4", "2").unwrap();
        assert_order(&store, &["0", "1", "2", "4", "3", "5", "6"]);
    }

    #[test]
    fn test_move_item_before() {
        let store = create_test_store(7);
        store.move_item_before("4", "2").unwrap();
        assert_order(&store, &["0", "1", "4", "2", "3", "5", "6"]);
    }

    #[test]
    fn test_move_item_after_last_item() {
        let store = create_test_store(7);
        store.move_item_after("4", "6").unwrap();
        assert_order(&store, &["0", "1", "2", "3", "5", "6", "4"]);
    }

    #[test]
    fn test_move_item_before_first_item() {
        let store = create_test_store(7);
        store.move_item_before("4", "0").unwrap();
        assert_order(&store, &["4", "0", "1", "2", "3", "5", "6"]);
    }

    #[test]
    fn test_move_endpoints_across_each_other() {
        let store = create_test_store(4);
        store.move_item_after("0", "3").unwrap();
        assert_order(&store, &["1", "2", "3", "0"]);

        store.move_item_before("0", "1").unwrap();
        assert_order(&store, &["0", "1", "2", "3"]);

        // Last item after the item that becomes last once it is detached.
        store.move_item_after("3", "2").unwrap();
        assert_order(&store, &["0", "1", "2", "3"]);

        store.move_item_before("0", "1").unwrap();
        assert_order(&store, &["0", "1", "2", "3"]);
    }

    #[test]
    fn test_move_adjacent_items_swap() {
        let store = create_test_store(3);
        store.move_item_after("0", "1").unwrap();
        assert_order(&store, &["1", "0", "2"]);

        store.move_item_before("2", "0").unwrap();
        assert_order(&store, &["1", "2", "0"]);
    }

    #[test]
    fn test_move_relative_to_itself_is_noop() {
        let store = create_test_store(5);
        store.dirty.take();

        store.move_item_after("2", "2").unwrap();
        store.move_item_before("2", "2").unwrap();

        assert_order(&store, &["0", "1", "2", "3", "4"]);
        assert!(!store.dirty.is_dirty());
    }

    #[test]
    fn test_delete_head_middle_and_tail() {
        let store = create_test_store(5);

        store.delete_item("0").unwrap();
        assert_order(&store, &["1", "2", "3", "4"]);

        store.delete_item("4").unwrap();
        assert_order(&store, &["1", "2", "3"]);

        store.delete_item("2").unwrap();
        assert_order(&store, &["1", "3"]);

        store.delete_item("3").unwrap();
        store.delete_item("1").unwrap();
        assert_order(&store, &[]);
        assert!(store.is_empty());

        // The emptied store accepts new items at both endpoints again.
        store.add_item("z", Some("z".into())).unwrap();
        assert_order(&store, &["z"]);
    }

    #[test]
    fn test_delete_frees_capacity() {
        let store = new_store(StoreLimits {
            max_items: 2,
            max_text_length: 10,
        });
        store.add_item("a", Some("a".into())).unwrap();
        store.add_item("b", Some("b".into())).unwrap();
        store.delete_item("a").unwrap();

        store.add_item("c", Some("c".into())).unwrap();
        assert_order(&store, &["b", "c"]);
    }

    #[test]
    fn test_mixed_operations_keep_links_consistent() {
        let store = create_test_store(10);
        store.delete_item("5").unwrap();
        store.move_item_before("9", "0").unwrap();
        store.move_item_after("0", "8").unwrap();
        store.delete_item("9").unwrap();
        store.add_item("10", Some("10".into())).unwrap();
        store.move_item_before("10", "3").unwrap();
        store.delete_item("0").unwrap();

        assert_order(&store, &["1", "2", "10", "3", "4", "6", "7", "8"]);
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_mutations_mark_dirty() {
        let store = create_test_store(3);
        assert!(store.dirty.take());

        store.edit_item("0", "zero").unwrap();
        assert!(store.dirty.take());

        store.move_item_after("0", "2").unwrap();
        assert!(store.dirty.take());

        store.delete_item("1").unwrap();
        assert!(store.dirty.take());

        store.list_all();
        store.list_all_reverse();
        assert!(!store.dirty.is_dirty());
    }

    #[test]
    fn test_json() {
        let store = create_test_store(4);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(
            json,
            r#"[{"UUID":"0","value":"0"},{"UUID":"1","value":"1"},{"UUID":"2","value":"2"},{"UUID":"3","value":"3"}]"#
        );

        let items: Vec<Item> = serde_json::from_str(&json).unwrap();
        let restored = OrderedItemStore::from_items(
            items,
            StoreLimits::default(),
            DirtyFlag::new(),
            default_generator(),
        )
        .unwrap();
        assert_eq!(restored.list_all(), store.list_all());
        assert_order(&restored, &["0", "1", "2", "3"]);
    }

    #[test]
    fn test_empty_store_serializes_to_empty_array() {
        let store = new_store(StoreLimits::default());
        assert_eq!(serde_json::to_string(&store).unwrap(), "[]");
    }

    #[test]
    fn test_restore_from_empty_input_is_usable() {
        let dirty = DirtyFlag::new();
        let store = OrderedItemStore::from_items(
            Vec::new(),
            StoreLimits::default(),
            dirty.clone(),
            default_generator(),
        )
        .unwrap();
        assert!(!dirty.is_dirty());

        store.add_item("first", Some("f".into())).unwrap();
        store.add_item("second", Some("s".into())).unwrap();
        store.move_item_before("s", "f").unwrap();
        assert_order(&store, &["second", "first"]);
        assert!(dirty.is_dirty());
    }

    #[test]
    fn test_restore_rejects_empty_id() {
        let items = vec![Item::new("a", "a"), Item::new("", "b")];
        let err = OrderedItemStore::from_items(
            items,
            StoreLimits::default(),
            DirtyFlag::new(),
            default_generator(),
        )
        .unwrap_err();
        assert_eq!(err, StoreError::EmptyId);

        let err = OrderedItemStore::from_items(
            vec![Item::new("", "first")],
            StoreLimits::default(),
            DirtyFlag::new(),
            default_generator(),
        )
        .unwrap_err();
        assert_eq!(err, StoreError::EmptyId);
    }

    #[test]
    fn test_restore_rejects_duplicate_id() {
        let items = vec![
            Item::new("a", "1"),
            Item::new("b", "2"),
            Item::new("a", "3"),
        ];
        let err = OrderedItemStore::from_items(
            items,
            StoreLimits::default(),
            DirtyFlag::new(),
            default_generator(),
        )
        .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a".into()));
    }

    #[test]
    fn test_concurrent_adds_and_moves() {
        let store = Arc::new(new_store(StoreLimits {
            max_items: 10_000,
            max_text_length: 100,
        }));
        store.add_item("anchor", Some("anchor".into())).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let id = format!("{t}-{i}");
                        store.add_item(id.clone(), Some(id.clone())).unwrap();
                        if i % 2 == 0 {
                            store.move_item_before(&id, "anchor").unwrap();
                        }
                        if i % 5 == 0 {
                            store.delete_item(&id).unwrap();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        store.chain.lock().assert_consistent();
        assert_eq!(store.len(), 1 + 8 * 80);
        let forward = store.list_all();
        let mut backward = store.list_all_reverse();
        backward.reverse();
        assert_eq!(forward, backward);
    }
}
