use super::{require_app_dir, CmdResult};
use crate::config::PlatformConfig;
use crate::environment;
use crate::error::Result;
use crate::manifest::AppManifest;
use crate::model::AppId;
use crate::runner::Runner;
use crate::secrets::Seed;

/// Raw orchestrator passthrough: same merged files and environment as the
/// lifecycle commands, caller-supplied arguments verbatim.
pub fn run<R: Runner>(
    runner: &R,
    config: &PlatformConfig,
    seed: &Seed,
    id: &AppId,
    args: &[String],
) -> Result<CmdResult> {
    require_app_dir(config, id)?;

    let manifest = AppManifest::load(&config.app_manifest_file(id))?;
    let env = environment::compose_env(config, seed, id, &manifest)?;
    runner.compose(id, &env, args)?;

    // The orchestrator's own output is the output here.
    Ok(CmdResult::default())
}
