//! # Storage Layer
//!
//! The installed-apps registry lives behind the [`StateStore`] trait so the
//! command layer never touches the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store. JSON document at
//!   `<root>/db/apps.json`, guarded by an exclusive lock file and written
//!   atomically (temp file + rename), so concurrent CLI invocations cannot
//!   tear or interleave writes.
//! - [`memory::InMemoryStore`]: in-memory store for tests. No persistence,
//!   no locking, fast isolated execution.
//!
//! ## Update model
//!
//! All mutation goes through a single read-modify-write transaction:
//! [`StateStore::update`] takes a closure over the deserialized
//! [`Registry`], and the implementation is responsible for serializing
//! concurrent updates and persisting the result as one unit. There is no
//! separate write path, so a caller cannot accidentally clobber another
//! process's insert with a stale read.

use crate::error::Result;
use crate::model::Registry;

pub mod fs;
pub mod lock;
pub mod memory;

/// Abstract interface to the installed-apps registry.
pub trait StateStore {
    /// Read the current registry. An absent registry reads as empty.
    fn read(&self) -> Result<Registry>;

    /// Apply `mutate` to the registry under exclusive access and persist
    /// the result. Returns the registry as written.
    fn update(&mut self, mutate: &mut dyn FnMut(&mut Registry)) -> Result<Registry>;
}
