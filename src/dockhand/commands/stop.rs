use super::{require_app_dir, CmdMessage, CmdResult};
use crate::config::PlatformConfig;
use crate::environment;
use crate::error::Result;
use crate::manifest::AppManifest;
use crate::model::AppId;
use crate::runner::Runner;
use crate::secrets::Seed;

pub fn run<R: Runner>(
    runner: &R,
    config: &PlatformConfig,
    seed: &Seed,
    id: &AppId,
) -> Result<CmdResult> {
    require_app_dir(config, id)?;

    let manifest = AppManifest::load(&config.app_manifest_file(id))?;
    let env = environment::compose_env(config, seed, id, &manifest)?;
    runner.stop(id, &env)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Stopped {}", id)));
    Ok(result)
}
