//! Top-level collection of lists, keyed by list id.

pub mod list;
#[allow(clippy::module_inception)]
pub mod registry;

pub use list::{ItemList, ListSummary};
pub use registry::{ListRegistry, DEFAULT_MAX_LISTS};
