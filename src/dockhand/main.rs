use clap::error::ErrorKind;
use clap::Parser;
use colored::*;
use dockhand::api::DockhandApi;
use dockhand::commands::{CmdMessage, CmdResult, MessageLevel};
use dockhand::config::PlatformConfig;
use dockhand::error::{DockhandError, Result};
use dockhand::fanout;
use dockhand::model::{AppId, BROADCAST_TARGET};
use dockhand::runner::DockerCompose;
use dockhand::store::fs::FileStore;
use dockhand::store::StateStore;
use std::process::Command;

mod args;
use args::{Cli, Commands};

type Api = DockhandApi<FileStore, DockerCompose>;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit 1 with help printed; --help/--version exit 0.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(exit_code_for(&e));
        }
    }
}

fn exit_code_for(err: &DockhandError) -> i32 {
    match err {
        // The orchestrator's own status is the contract; everything else is 1.
        DockhandError::Orchestrator { code, .. } => *code,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<i32> {
    let root = PlatformConfig::resolve_root()?;
    let config = PlatformConfig::load(root)?;

    match cli.command {
        Commands::LsInstalled => handle_ls_installed(&config),
        Commands::Install { app } => {
            lifecycle(&config, "install", &app, &[], |api, app, _| api.install(app))
        }
        Commands::Uninstall { app } => lifecycle(&config, "uninstall", &app, &[], |api, app, _| {
            api.uninstall(app)
        }),
        Commands::Start { app } => {
            lifecycle(&config, "start", &app, &[], |api, app, _| api.start(app))
        }
        Commands::Stop { app } => {
            lifecycle(&config, "stop", &app, &[], |api, app, _| api.stop(app))
        }
        Commands::Compose { app, args } => {
            lifecycle(&config, "compose", &app, &args, |api, app, extra| {
                api.compose(app, extra)
            })
        }
    }
}

fn lifecycle<F>(
    config: &PlatformConfig,
    verb: &str,
    app: &str,
    extra: &[String],
    op: F,
) -> Result<i32>
where
    F: FnOnce(&mut Api, &str, &[String]) -> Result<CmdResult>,
{
    if app == BROADCAST_TARGET {
        return broadcast(config, verb, extra);
    }

    let runner = DockerCompose::probe(config)?;
    let store = FileStore::for_config(config);
    let mut api = DockhandApi::new(store, runner, config.clone());
    let result = op(&mut api, app, extra)?;
    print_messages(&result.messages);
    Ok(0)
}

fn handle_ls_installed(config: &PlatformConfig) -> Result<i32> {
    let store = FileStore::for_config(config);
    let api = DockhandApi::new(store, NullRunner, config.clone());
    let result = api.ls_installed()?;
    for app in &result.installed_apps {
        println!("{}", app);
    }
    Ok(0)
}

/// Fan the command out to every installed app: one child process per app on
/// a bounded worker pool, per-app outcome reporting, join-all semantics.
fn broadcast(config: &PlatformConfig, verb: &str, extra: &[String]) -> Result<i32> {
    let store = FileStore::for_config(config);
    let registry = store.read()?;
    let mut apps = Vec::new();
    for name in &registry.installed_apps {
        apps.push(AppId::new(name)?);
    }
    if apps.is_empty() {
        println!("{}", "No apps installed.".dimmed());
        return Ok(0);
    }

    let exe = std::env::current_exe()?;
    let outcomes = fanout::run_pool(apps, config.broadcast_workers, |app| {
        let status = Command::new(&exe)
            .arg(verb)
            .arg(app.as_str())
            .args(extra)
            .status()
            .map_err(|err| err.to_string())?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("exit status {}", status.code().unwrap_or(1)))
        }
    });

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => println!("{} {}", "ok".green(), outcome.app),
            Err(detail) => {
                failed += 1;
                println!("{} {} ({})", "failed".red(), outcome.app, detail);
            }
        }
    }
    if failed > 0 {
        eprintln!("{} of {} apps failed", failed, outcomes.len());
        return Ok(1);
    }
    Ok(0)
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Listing never talks to the orchestrator, so it gets a runner that must
/// not be reachable.
struct NullRunner;

impl dockhand::runner::Runner for NullRunner {
    fn compose(
        &self,
        app: &AppId,
        _env: &std::collections::BTreeMap<String, String>,
        _args: &[String],
    ) -> Result<()> {
        Err(DockhandError::Store(format!(
            "orchestrator invoked for {} during a listing",
            app
        )))
    }
}
