use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{DockhandError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Holder metadata written into the lock file, so a waiter that times out
/// can name the process it was stuck behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockMeta {
    pub pid: u32,
    pub acquired_at: DateTime<Utc>,
}

/// Exclusive lock file guarding the registry.
///
/// Acquisition creates the file with `create_new`, polling at a fixed
/// interval until the deadline. The lock is released when the guard drops,
/// which covers normal completion, error returns and unwinds alike.
#[derive(Debug)]
pub struct StateLock {
    path: PathBuf,
}

impl StateLock {
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self> {
        let deadline = Instant::now() + timeout;
        loop {
            match try_create(path) {
                Ok(()) => {
                    return Ok(Self {
                        path: path.to_path_buf(),
                    })
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    if Instant::now() >= deadline {
                        return Err(DockhandError::LockTimeout {
                            path: path.to_path_buf(),
                            holder: read_holder(path),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn try_create(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    let meta = LockMeta {
        pid: std::process::id(),
        acquired_at: Utc::now(),
    };
    serde_json::to_writer(&file, &meta).map_err(io::Error::other)?;
    Ok(())
}

fn read_holder(path: &Path) -> Option<u32> {
    let bytes = fs::read(path).ok()?;
    serde_json::from_slice::<LockMeta>(&bytes)
        .ok()
        .map(|meta| meta.pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_drop_releases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json.lock");

        let lock = StateLock::acquire(&path, Duration::from_secs(1)).unwrap();
        assert!(path.exists());
        drop(lock);
        assert!(!path.exists());

        // Reacquirable after release.
        let _lock = StateLock::acquire(&path, Duration::from_secs(1)).unwrap();
    }

    #[test]
    fn contended_acquire_times_out_with_holder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json.lock");

        let _held = StateLock::acquire(&path, Duration::from_secs(1)).unwrap();
        let err = StateLock::acquire(&path, Duration::from_millis(120))
            .expect_err("lock must be contended");
        match err {
            DockhandError::LockTimeout { holder, .. } => {
                assert_eq!(holder, Some(std::process::id()));
            }
            other => panic!("expected LockTimeout, got {other}"),
        }
    }

    #[test]
    fn waiter_proceeds_once_holder_releases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json.lock");

        let held = StateLock::acquire(&path, Duration::from_secs(1)).unwrap();
        let waiter_path = path.clone();
        let waiter = thread::spawn(move || {
            StateLock::acquire(&waiter_path, Duration::from_secs(5)).is_ok()
        });

        thread::sleep(Duration::from_millis(150));
        drop(held);
        assert!(waiter.join().unwrap());
    }
}
