use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::ItemList;
use crate::store::{Item, StoreLimits};

/// On-disk form of the registry.
///
/// `M` maps list id to list record. `Total` and `MaxTotal` are written for
/// readers of the file and ignored on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(rename = "M", default)]
    pub lists: BTreeMap<String, ListRecord>,
    #[serde(rename = "Total", default)]
    pub total: usize,
    #[serde(rename = "MaxTotal", default)]
    pub max_total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecord {
    #[serde(rename = "UUID", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Created")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "MaxItems", default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(
        rename = "MaxTextLength",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_text_length: Option<usize>,
    /// Absent or `null` reads as an empty list.
    #[serde(rename = "List", default)]
    pub items: Option<Vec<Item>>,
}

impl ListRecord {
    /// Copies a live list. Takes the list's store lock for the item read.
    pub fn capture(list: &ItemList) -> Self {
        let limits = list.store.limits();
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            created_at: list.created_at,
            max_items: Some(limits.max_items),
            max_text_length: Some(limits.max_text_length),
            items: Some(list.store.list_all()),
        }
    }

    /// Limits stored with the record, falling back to `defaults` per field.
    pub fn limits_or(&self, defaults: StoreLimits) -> StoreLimits {
        StoreLimits {
            max_items: self.max_items.unwrap_or(defaults.max_items),
            max_text_length: self.max_text_length.unwrap_or(defaults.max_text_length),
        }
    }
}

impl RegistrySnapshot {
    pub fn from_records(records: impl IntoIterator<Item = ListRecord>, max_total: usize) -> Self {
        let lists: BTreeMap<String, ListRecord> = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            total: lists.len(),
            lists,
            max_total,
        }
    }
}
