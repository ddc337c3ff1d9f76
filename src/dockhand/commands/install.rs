use std::fs;
use std::path::Path;

use super::{require_app_dir, CmdMessage, CmdResult};
use crate::config::PlatformConfig;
use crate::environment;
use crate::error::Result;
use crate::manifest::AppManifest;
use crate::model::AppId;
use crate::runner::Runner;
use crate::secrets::Seed;
use crate::store::StateStore;

pub fn run<S: StateStore, R: Runner>(
    store: &mut S,
    runner: &R,
    config: &PlatformConfig,
    seed: &Seed,
    id: &AppId,
) -> Result<CmdResult> {
    require_app_dir(config, id)?;
    let manifest = AppManifest::load(&config.app_manifest_file(id))?;

    let mut result = CmdResult::default();

    // Seed the data dir from the descriptor template, but never clobber an
    // existing one: a reinstall keeps user data.
    let data_dir = config.app_data_dir(id);
    if data_dir.exists() {
        result.add_message(CmdMessage::info(format!(
            "Keeping existing data directory for {}",
            id
        )));
    } else {
        copy_tree(&config.app_dir(id), &data_dir)?;
    }

    let mut fresh = false;
    store.update(&mut |registry| {
        fresh = registry.insert(id);
    })?;

    let env = environment::compose_env(config, seed, id, &manifest)?;
    runner.up(id, &env)?;

    result.add_message(if fresh {
        CmdMessage::success(format!("Installed {}", id))
    } else {
        CmdMessage::info(format!("{} was already installed", id))
    });
    Ok(result)
}

/// Recursive copy of the app descriptor into the data directory.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
