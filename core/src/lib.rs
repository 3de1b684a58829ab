//! Ordered item lists: a slab-backed doubly-linked store per list, a bounded
//! registry of lists, and JSON snapshot persistence.

pub mod api;
pub mod config;
pub mod dirty;
pub mod error;
pub mod ids;
pub mod persist;
pub mod registry;
pub mod store;
