use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use parking_lot::RwLock;

use super::list::{ItemList, ListSummary};
use crate::dirty::DirtyFlag;
use crate::error::{RegistryError, StoreError};
use crate::ids::{default_generator, IdGenerator};
use crate::store::{Item, OrderedItemStore, StoreLimits, DEFAULT_MAX_TEXT_LENGTH};

pub const DEFAULT_MAX_LISTS: usize = 1000;

/// Owns every list and the process-wide dirty flag.
///
/// The map lock is held only for lookups, inserts and removals. Lists are
/// handed out as `Arc`s so item operations run on the list's own store lock
/// after the map lock is released.
pub struct ListRegistry {
    lists: RwLock<HashMap<String, Arc<ItemList>>>,
    max_lists: usize,
    max_text_length: usize,
    dirty: DirtyFlag,
    ids: Arc<dyn IdGenerator>,
}

impl ListRegistry {
    pub fn new(max_lists: usize, max_text_length: usize) -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
            max_lists,
            max_text_length,
            dirty: DirtyFlag::new(),
            ids: default_generator(),
        }
    }

    /// Replaces the id source used for new lists and for items added to any
    /// list created afterwards.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn max_lists(&self) -> usize {
        self.max_lists
    }

    pub fn dirty(&self) -> &DirtyFlag {
        &self.dirty
    }

    pub fn len(&self) -> usize {
        self.lists.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates an empty list holding at most `max_items` items.
    pub fn new_list(
        &self,
        name: impl Into<String>,
        max_items: usize,
    ) -> Result<Arc<ItemList>, RegistryError> {
        let mut lists = self.lists.write();
        if lists.len() >= self.max_lists {
            return Err(RegistryError::TooManyLists {
                max: self.max_lists,
            });
        }

        let id = self.ids.generate().map_err(RegistryError::IdGeneration)?;
        if lists.contains_key(&id) {
            return Err(RegistryError::IdGeneration(format!(
                "generated id '{id}' is already in use"
            )));
        }

        let limits = StoreLimits {
            max_items,
            max_text_length: self.max_text_length,
        };
        let list = Arc::new(ItemList {
            id: id.clone(),
            name: name.into(),
            created_at: Utc::now().trunc_subsecs(3),
            store: OrderedItemStore::new(limits, self.dirty.clone(), Arc::clone(&self.ids)),
        });
        lists.insert(id, Arc::clone(&list));
        self.dirty.mark();
        tracing::debug!(list_id = %list.id, name = %list.name, "list created");
        Ok(list)
    }

    pub fn get_list(&self, id: &str) -> Option<Arc<ItemList>> {
        self.lists.read().get(id).cloned()
    }

    pub fn delete_list(&self, id: &str) -> Result<(), RegistryError> {
        let removed = self.lists.write().remove(id);
        match removed {
            Some(_) => {
                self.dirty.mark();
                tracing::debug!(list_id = %id, "list deleted");
                Ok(())
            }
            None => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    /// Summaries of every list, oldest first. Equal timestamps order by id.
    pub fn all_lists(&self) -> Vec<ListSummary> {
        let mut summaries: Vec<ListSummary> =
            self.lists.read().values().map(|list| list.summary()).collect();
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        summaries
    }

    /// Handles to every list, copied under the map lock. Stores are not
    /// touched until the caller reads them.
    pub fn snapshot_lists(&self) -> Vec<Arc<ItemList>> {
        self.lists.read().values().cloned().collect()
    }

    /// Builds a list wired to this registry's dirty flag and id source from
    /// previously saved contents. The list is not inserted.
    pub fn restore_list(
        &self,
        id: String,
        name: String,
        created_at: DateTime<Utc>,
        limits: StoreLimits,
        items: Vec<Item>,
    ) -> Result<ItemList, StoreError> {
        let store =
            OrderedItemStore::from_items(items, limits, self.dirty.clone(), Arc::clone(&self.ids))?;
        Ok(ItemList {
            id,
            name,
            created_at,
            store,
        })
    }

    /// Swaps in a whole new set of lists. Does not mark the registry dirty.
    pub fn replace_all(&self, lists: impl IntoIterator<Item = ItemList>) {
        let map: HashMap<String, Arc<ItemList>> = lists
            .into_iter()
            .map(|list| (list.id.clone(), Arc::new(list)))
            .collect();
        *self.lists.write() = map;
    }
}

impl Default for ListRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LISTS, DEFAULT_MAX_TEXT_LENGTH)
    }
}
