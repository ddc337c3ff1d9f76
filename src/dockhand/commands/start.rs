use super::{require_app_dir, CmdMessage, CmdResult};
use crate::config::PlatformConfig;
use crate::environment;
use crate::error::{DockhandError, Result};
use crate::manifest::AppManifest;
use crate::model::AppId;
use crate::runner::Runner;
use crate::secrets::Seed;
use crate::store::StateStore;

pub fn run<S: StateStore, R: Runner>(
    store: &S,
    runner: &R,
    config: &PlatformConfig,
    seed: &Seed,
    id: &AppId,
) -> Result<CmdResult> {
    require_app_dir(config, id)?;

    // Refuse before touching the orchestrator.
    if !store.read()?.contains(id) {
        return Err(DockhandError::NotInstalled(id.to_string()));
    }

    let manifest = AppManifest::load(&config.app_manifest_file(id))?;
    let env = environment::compose_env(config, seed, id, &manifest)?;
    runner.up(id, &env)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Started {}", id)));
    Ok(result)
}
