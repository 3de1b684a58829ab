//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `listkeeper_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, AppConfig, HttpServerConfig, LoggingConfig, StorageConfig,
};
pub use crate::dirty::DirtyFlag;
pub use crate::error::{CliError, PersistError, RegistryError, StoreError};
pub use crate::ids::{IdGenerator, UuidGenerator};
pub use crate::persist::{spawn_autosave, PersistenceGateway, RegistrySnapshot, SaveOutcome};
pub use crate::registry::{ItemList, ListRegistry, ListSummary};
pub use crate::store::{Item, OrderedItemStore, StoreLimits};
