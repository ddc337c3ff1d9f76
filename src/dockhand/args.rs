use clap::{Parser, Subcommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "dockhand")]
#[command(about = "Install, start, stop and remove apps on a home server", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install an app and start its containers
    Install {
        /// App name, or `installed` to reinstall every installed app
        app: String,
    },

    /// Stop an app's containers and remove it
    Uninstall {
        /// App name, or `installed` to broadcast
        app: String,
    },

    /// Start an installed app
    Start {
        /// App name, or `installed` to broadcast
        app: String,
    },

    /// Stop a running app
    Stop {
        /// App name, or `installed` to broadcast
        app: String,
    },

    /// Invoke the orchestrator for an app with raw arguments
    Compose {
        /// App name
        app: String,

        /// Arguments passed to the orchestrator verbatim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List installed apps, one per line
    LsInstalled,
}
