use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use super::lock::StateLock;
use super::StateStore;
use crate::config::PlatformConfig;
use crate::error::Result;
use crate::model::Registry;

/// File-backed registry store.
///
/// The JSON document is guarded by a lock file for the whole
/// read-modify-write cycle and replaced atomically via a temp-file rename,
/// so a concurrent reader never observes a torn document.
pub struct FileStore {
    registry_path: PathBuf,
    lock_path: PathBuf,
    lock_timeout: Duration,
}

impl FileStore {
    pub fn new(registry_path: PathBuf, lock_path: PathBuf, lock_timeout: Duration) -> Self {
        Self {
            registry_path,
            lock_path,
            lock_timeout,
        }
    }

    pub fn for_config(config: &PlatformConfig) -> Self {
        Self::new(
            config.registry_path(),
            config.lock_path(),
            config.lock_timeout(),
        )
    }

    fn load(&self) -> Result<Registry> {
        if !self.registry_path.exists() {
            return Ok(Registry::default());
        }
        let content = fs::read_to_string(&self.registry_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn persist(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.registry_path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Writes land in a sibling temp file first; the rename is what makes
        // the new registry visible.
        let tmp = self.registry_path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(registry)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.registry_path)?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn read(&self) -> Result<Registry> {
        self.load()
    }

    fn update(&mut self, mutate: &mut dyn FnMut(&mut Registry)) -> Result<Registry> {
        let _lock = StateLock::acquire(&self.lock_path, self.lock_timeout)?;
        let mut registry = self.load()?;
        mutate(&mut registry);
        self.persist(&registry)?;
        Ok(registry)
    }
}
