use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::snapshot::{ListRecord, RegistrySnapshot};
use crate::error::PersistError;
use crate::registry::ListRegistry;
use crate::store::StoreLimits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed since the last successful write.
    Skipped,
    Written { lists: usize },
}

/// Loads the registry from and saves it to a single snapshot file.
pub struct PersistenceGateway {
    registry: Arc<ListRegistry>,
    path: PathBuf,
    default_limits: StoreLimits,
    save_lock: Mutex<()>,
}

impl PersistenceGateway {
    /// `default_limits` apply to saved lists that carry no limits of their own.
    pub fn new(
        registry: Arc<ListRegistry>,
        path: impl Into<PathBuf>,
        default_limits: StoreLimits,
    ) -> Self {
        Self {
            registry,
            path: path.into(),
            default_limits,
            save_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn registry(&self) -> &Arc<ListRegistry> {
        &self.registry
    }

    /// Reads a snapshot file. A missing file is `Ok(None)`.
    pub fn read_snapshot(path: &Path) -> Result<Option<RegistrySnapshot>, PersistError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(PersistError::Parse)
    }

    /// Replaces the registry contents with the snapshot on disk and returns
    /// the number of lists loaded.
    ///
    /// Without a snapshot file the registry is left as it is. Any invalid
    /// list aborts the load before the registry is touched.
    pub fn load(&self) -> Result<usize, PersistError> {
        let Some(snapshot) = Self::read_snapshot(&self.path)? else {
            info!(path = %self.path.display(), "no snapshot found, starting empty");
            return Ok(0);
        };

        let mut lists = Vec::with_capacity(snapshot.lists.len());
        for (list_id, record) in snapshot.lists {
            if !record.id.is_empty() && record.id != list_id {
                warn!(
                    key = %list_id,
                    recorded = %record.id,
                    "snapshot list id differs from its key, using the key"
                );
            }
            let limits = record.limits_or(self.default_limits);
            let list = self
                .registry
                .restore_list(
                    list_id.clone(),
                    record.name,
                    record.created_at,
                    limits,
                    record.items.unwrap_or_default(),
                )
                .map_err(|source| PersistError::InvalidList { list_id, source })?;
            lists.push(list);
        }

        let count = lists.len();
        if count > self.registry.max_lists() {
            warn!(
                lists = count,
                max_lists = self.registry.max_lists(),
                "snapshot holds more lists than allowed, new lists will be refused"
            );
        }
        self.registry.replace_all(lists);
        info!(path = %self.path.display(), lists = count, "snapshot loaded");
        Ok(count)
    }

    /// Writes the registry to disk if anything changed since the last write.
    ///
    /// The dirty flag is cleared before state is copied, so mutations racing
    /// with the copy set it again and trigger the next save. A failed write
    /// re-sets the flag.
    pub fn save(&self) -> Result<SaveOutcome, PersistError> {
        let _guard = self.save_lock.lock();
        if !self.registry.dirty().take() {
            debug!("no changes since last save");
            return Ok(SaveOutcome::Skipped);
        }

        match self.write_snapshot() {
            Ok(lists) => {
                info!(path = %self.path.display(), lists, "file saved");
                Ok(SaveOutcome::Written { lists })
            }
            Err(e) => {
                self.registry.dirty().mark();
                Err(e)
            }
        }
    }

    fn write_snapshot(&self) -> Result<usize, PersistError> {
        let records: Vec<ListRecord> = self
            .registry
            .snapshot_lists()
            .iter()
            .map(|list| ListRecord::capture(list))
            .collect();
        let snapshot = RegistrySnapshot::from_records(records, self.registry.max_lists());
        let bytes = serde_json::to_vec(&snapshot).map_err(PersistError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Write beside the target, then rename over it.
        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).map_err(|source| PersistError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(snapshot.total)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
