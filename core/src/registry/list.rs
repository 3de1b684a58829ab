use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::OrderedItemStore;

/// A named list and its items.
///
/// Serializes with the list's items under `List`, in order.
#[derive(Debug, Serialize)]
pub struct ItemList {
    #[serde(rename = "UUID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Created")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "List")]
    pub store: OrderedItemStore,
}

impl ItemList {
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// List metadata without items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    #[serde(rename = "UUID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Created")]
    pub created_at: DateTime<Utc>,
}
