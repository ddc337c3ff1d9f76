use std::fs;

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
    let env = environment::compose_env(config, seed, id, &manifest)?;

    runner.down(id, &env)?;

    let data_dir = config.app_data_dir(id);
    if data_dir.exists() {
        fs::remove_dir_all(&data_dir)?;
    }

    let mut removed = false;
    store.update(&mut |registry| {
        removed = registry.remove(id);
    })?;

    let mut result = CmdResult::default();
    result.add_message(if removed {
        CmdMessage::success(format!("Uninstalled {}", id))
    } else {
        CmdMessage::info(format!("{} was not installed", id))
    });
    Ok(result)
}
