use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DockhandError, Result};
use crate::model::AppId;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_COMPOSE_BIN: &str = "docker-compose";
const DEFAULT_BASE_COMPOSE: &str = "docker-compose.yml";
const DEFAULT_LOCK_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_BROADCAST_WORKERS: usize = 4;

/// Platform configuration, stored in `<root>/config.json`.
///
/// Everything the CLI touches lives beneath a single platform root:
///
/// ```text
/// <root>/
/// ├── config.json            # This file (optional, defaults apply)
/// ├── docker-compose.yml     # Base compose file merged before each app's
/// ├── apps/<id>/             # App descriptor directories (read-only templates)
/// ├── app-data/<id>/         # Per-app data, copied from the descriptor on install
/// ├── db/apps.json           # Installed-apps registry (+ transient .lock sibling)
/// ├── db/seed/seed           # Master seed for secret derivation
/// └── tor/data/              # Hidden service hostname files
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    #[serde(skip)]
    pub root: PathBuf,

    /// Orchestrator binary name or path.
    #[serde(default = "default_compose_bin")]
    pub compose_bin: String,

    /// Base compose file name, resolved relative to the root.
    #[serde(default = "default_base_compose")]
    pub base_compose: String,

    /// How long a registry mutation may wait on the state lock.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,

    /// Worker count for the `installed` broadcast pool.
    #[serde(default = "default_broadcast_workers")]
    pub broadcast_workers: usize,
}

fn default_compose_bin() -> String {
    DEFAULT_COMPOSE_BIN.to_string()
}

fn default_base_compose() -> String {
    DEFAULT_BASE_COMPOSE.to_string()
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

fn default_broadcast_workers() -> usize {
    DEFAULT_BROADCAST_WORKERS
}

impl PlatformConfig {
    /// Config with defaults for the given root.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            compose_bin: default_compose_bin(),
            base_compose: default_base_compose(),
            lock_timeout_ms: default_lock_timeout_ms(),
            broadcast_workers: default_broadcast_workers(),
        }
    }

    /// Resolve the platform root: `$DOCKHAND_ROOT`, else the user data dir.
    pub fn resolve_root() -> Result<PathBuf> {
        if let Ok(root) = env::var("DOCKHAND_ROOT") {
            if !root.is_empty() {
                return Ok(PathBuf::from(root));
            }
        }
        let dirs = ProjectDirs::from("sh", "dockhand", "dockhand").ok_or_else(|| {
            DockhandError::Store("could not determine a platform root; set DOCKHAND_ROOT".into())
        })?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Load config for the given root, falling back to defaults when
    /// `config.json` is absent. `DOCKHAND_COMPOSE_BIN` overrides the
    /// orchestrator binary.
    pub fn load(root: PathBuf) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Self::new(PathBuf::new())
        };
        config.root = root;

        if let Ok(bin) = env::var("DOCKHAND_COMPOSE_BIN") {
            if !bin.is_empty() {
                config.compose_bin = bin;
            }
        }
        Ok(config)
    }

    pub fn apps_dir(&self) -> PathBuf {
        self.root.join("apps")
    }

    pub fn app_dir(&self, id: &AppId) -> PathBuf {
        self.apps_dir().join(id.as_str())
    }

    pub fn app_compose_file(&self, id: &AppId) -> PathBuf {
        self.app_dir(id).join("docker-compose.yml")
    }

    pub fn app_manifest_file(&self, id: &AppId) -> PathBuf {
        self.app_dir(id).join("manifest.json")
    }

    pub fn app_data_dir(&self, id: &AppId) -> PathBuf {
        self.root.join("app-data").join(id.as_str())
    }

    pub fn db_dir(&self) -> PathBuf {
        self.root.join("db")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.db_dir().join("apps.json")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.db_dir().join("apps.json.lock")
    }

    pub fn seed_path(&self) -> PathBuf {
        self.db_dir().join("seed").join("seed")
    }

    /// Seed location left behind by in-place platform upgrades.
    pub fn upgrade_seed_path(&self) -> PathBuf {
        self.db_dir().join("seed-upgrade").join("seed")
    }

    pub fn tor_data_dir(&self) -> PathBuf {
        self.root.join("tor").join("data")
    }

    pub fn hidden_service_hostname(&self, id: &AppId) -> PathBuf {
        self.tor_data_dir()
            .join(format!("app-{}", id.as_str()))
            .join("hostname")
    }

    pub fn base_compose_file(&self) -> PathBuf {
        self.root.join(&self.base_compose)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}
