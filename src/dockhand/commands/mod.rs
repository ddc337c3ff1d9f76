use crate::config::PlatformConfig;
use crate::error::{DockhandError, Result};
use crate::model::AppId;

pub mod compose;
pub mod install;
pub mod list;
pub mod start;
pub mod stop;
pub mod uninstall;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured result returned by every command: data for the CLI layer to
/// render, never pre-formatted output.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub installed_apps: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_installed_apps(mut self, apps: Vec<String>) -> Self {
        self.installed_apps = apps;
        self
    }
}

/// Validate that the app descriptor directory exists. Every lifecycle
/// command gates on this; `ls-installed` is the one exception.
pub(crate) fn require_app_dir(config: &PlatformConfig, id: &AppId) -> Result<()> {
    if config.app_dir(id).is_dir() {
        Ok(())
    } else {
        Err(DockhandError::UnknownApp(id.to_string()))
    }
}
