//! # API Facade
//!
//! Single entry point for all lifecycle operations, regardless of the UI in
//! front of it. The facade normalizes raw app-name strings into validated
//! [`AppId`]s, loads seed material only for the operations that derive
//! secrets, and dispatches to the command layer. It returns structured
//! [`CmdResult`] values and never prints.
//!
//! `DockhandApi<S, R>` is generic over both seams:
//! - `S: StateStore`: `FileStore` in production, `InMemoryStore` in tests
//! - `R: Runner`: `DockerCompose` in production, a recording fake in tests

use crate::commands;
use crate::commands::CmdResult;
use crate::config::PlatformConfig;
use crate::error::Result;
use crate::model::AppId;
use crate::runner::Runner;
use crate::secrets::Seed;
use crate::store::StateStore;

pub struct DockhandApi<S: StateStore, R: Runner> {
    store: S,
    runner: R,
    config: PlatformConfig,
}

impl<S: StateStore, R: Runner> DockhandApi<S, R> {
    pub fn new(store: S, runner: R, config: PlatformConfig) -> Self {
        Self {
            store,
            runner,
            config,
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn install(&mut self, app: &str) -> Result<CmdResult> {
        let id: AppId = app.parse()?;
        let seed = Seed::load(&self.config)?;
        commands::install::run(&mut self.store, &self.runner, &self.config, &seed, &id)
    }

    pub fn uninstall(&mut self, app: &str) -> Result<CmdResult> {
        let id: AppId = app.parse()?;
        let seed = Seed::load(&self.config)?;
        commands::uninstall::run(&mut self.store, &self.runner, &self.config, &seed, &id)
    }

    pub fn start(&mut self, app: &str) -> Result<CmdResult> {
        let id: AppId = app.parse()?;
        let seed = Seed::load(&self.config)?;
        commands::start::run(&self.store, &self.runner, &self.config, &seed, &id)
    }

    pub fn stop(&mut self, app: &str) -> Result<CmdResult> {
        let id: AppId = app.parse()?;
        let seed = Seed::load(&self.config)?;
        commands::stop::run(&self.runner, &self.config, &seed, &id)
    }

    pub fn compose(&mut self, app: &str, args: &[String]) -> Result<CmdResult> {
        let id: AppId = app.parse()?;
        let seed = Seed::load(&self.config)?;
        commands::compose::run(&self.runner, &self.config, &seed, &id, args)
    }

    /// Seed-free: listing never derives anything.
    pub fn ls_installed(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }
}
