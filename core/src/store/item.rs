use serde::{Deserialize, Serialize};

/// A single text entry. Field names are part of the wire and snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "UUID")]
    pub id: String,
    #[serde(rename = "value")]
    pub text: String,
}

impl Item {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}
