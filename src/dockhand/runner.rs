use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use crate::config::PlatformConfig;
use crate::error::{DockhandError, Result};
use crate::model::AppId;

/// Seam to the external container orchestrator.
///
/// All service startup, networking, health and restart behavior is owned by
/// the orchestrator; this layer only assembles invocations. Tests substitute
/// a recording implementation.
pub trait Runner {
    /// Invoke the orchestrator for `app` with the given arguments and
    /// environment, propagating the orchestrator's own failure status.
    fn compose(
        &self,
        app: &AppId,
        env: &BTreeMap<String, String>,
        args: &[String],
    ) -> Result<()>;

    fn up(&self, app: &AppId, env: &BTreeMap<String, String>) -> Result<()> {
        self.compose(app, env, &["up".to_string(), "--detach".to_string()])
    }

    fn stop(&self, app: &AppId, env: &BTreeMap<String, String>) -> Result<()> {
        self.compose(app, env, &["stop".to_string()])
    }

    fn down(&self, app: &AppId, env: &BTreeMap<String, String>) -> Result<()> {
        self.compose(app, env, &["down".to_string()])
    }
}

/// Production runner shelling out to docker-compose, merging the platform
/// base file with the app's own compose file.
pub struct DockerCompose {
    bin: String,
    base_file: PathBuf,
    apps_dir: PathBuf,
}

impl DockerCompose {
    /// Probe for the orchestrator binary. Missing tooling is fatal before
    /// any lifecycle work starts.
    pub fn probe(config: &PlatformConfig) -> Result<Self> {
        let bin = config.compose_bin.clone();
        let found = Command::new(&bin)
            .arg("version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !found {
            return Err(DockhandError::MissingDependency(bin));
        }
        Ok(Self {
            bin,
            base_file: config.base_compose_file(),
            apps_dir: config.apps_dir(),
        })
    }
}

impl Runner for DockerCompose {
    fn compose(
        &self,
        app: &AppId,
        env: &BTreeMap<String, String>,
        args: &[String],
    ) -> Result<()> {
        let app_file = self
            .apps_dir
            .join(app.as_str())
            .join("docker-compose.yml");

        let status = Command::new(&self.bin)
            .arg("--file")
            .arg(&self.base_file)
            .arg("--file")
            .arg(&app_file)
            .arg("--project-name")
            .arg(app.as_str())
            .args(args)
            .envs(env)
            .status()?;

        if !status.success() {
            return Err(DockhandError::Orchestrator {
                app: app.to_string(),
                code: status.code().unwrap_or(1),
            });
        }
        Ok(())
    }
}
