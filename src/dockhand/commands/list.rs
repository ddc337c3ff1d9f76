use super::CmdResult;
use crate::error::Result;
use crate::store::StateStore;

/// The installed-set, sorted, one entry per app. Bypasses app validation:
/// the registry is authoritative here, not the descriptor tree.
pub fn run<S: StateStore>(store: &S) -> Result<CmdResult> {
    let registry = store.read()?;
    Ok(CmdResult::default().with_installed_apps(registry.installed_apps))
}
