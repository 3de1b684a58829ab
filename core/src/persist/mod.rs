//! Snapshot persistence for the registry.
//!
//! The whole registry is written as one JSON document and read back
//! wholesale at startup. Writes only happen when the dirty flag is set.

pub mod autosave;
pub mod gateway;
pub mod snapshot;

pub use autosave::spawn_autosave;
pub use gateway::{PersistenceGateway, SaveOutcome};
pub use snapshot::{ListRecord, RegistrySnapshot};
