use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DockhandError>;

#[derive(Error, Debug)]
pub enum DockhandError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid app id '{id}': {reason}")]
    InvalidAppId { id: String, reason: String },

    #[error("unknown app: {0} (no such app directory)")]
    UnknownApp(String),

    #[error("app is not installed: {0}")]
    NotInstalled(String),

    #[error("required tool not found: {0}")]
    MissingDependency(String),

    #[error("seed file missing or empty at {}", .0.display())]
    EmptySeed(PathBuf),

    #[error("refusing to derive a secret for an empty label")]
    EmptyLabel,

    #[error(
        "timed out waiting for state lock at {} (held by pid {})",
        .path.display(),
        .holder.map_or_else(|| "unknown".to_string(), |pid| pid.to_string())
    )]
    LockTimeout { path: PathBuf, holder: Option<u32> },

    #[error("orchestrator exited with status {code} for app {app}")]
    Orchestrator { app: String, code: i32 },

    #[error("state store error: {0}")]
    Store(String),
}
