//! Ordered item storage for a single list.
//!
//! Items live in a slab-backed doubly-linked chain with an id index, so
//! append, delete and reordering are all O(1).

mod chain;
pub mod item;
pub mod ordered;

pub use item::Item;
pub use ordered::{OrderedItemStore, StoreLimits, DEFAULT_MAX_ITEMS, DEFAULT_MAX_TEXT_LENGTH};
