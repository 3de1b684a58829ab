use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single list's item operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("list is full ({max} items)")]
    CapacityExceeded { max: usize },
    #[error("item text is too long ({len} bytes, max {max})")]
    TextTooLong { len: usize, max: usize },
    #[error("id generation failed: {0}")]
    IdGeneration(String),
    #[error("empty item id is not supported")]
    EmptyId,
    #[error("duplicate item id '{0}' in the same list")]
    DuplicateId(String),
    #[error("item '{0}' does not exist")]
    NotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("already at maximum number of lists ({max})")]
    TooManyLists { max: usize },
    #[error("id generation failed: {0}")]
    IdGeneration(String),
    #[error("list '{0}' does not exist")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("snapshot io error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("snapshot parse failed: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("list '{list_id}' in snapshot is invalid: {source}")]
    InvalidList {
        list_id: String,
        source: StoreError,
    },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
