use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Declarative per-app requirements, stored as `manifest.json` in the app
/// descriptor directory.
///
/// Each entry resolves to one environment variable handed to the
/// orchestrator. Apps that need nothing beyond the base environment ship no
/// manifest at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppManifest {
    #[serde(default)]
    pub secrets: Vec<SecretRequirement>,
    #[serde(default)]
    pub hidden_services: Vec<HiddenServiceRequirement>,
    #[serde(default)]
    pub addresses: Vec<AddressBinding>,
}

/// Env var bound to a seed-derived secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretRequirement {
    pub env: String,
    pub label: String,
}

/// Env var bound to an onion hostname file under the tor data dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HiddenServiceRequirement {
    pub env: String,
    pub hostname_file: String,
}

/// Env var bound to a fixed address from the descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressBinding {
    pub env: String,
    pub value: String,
}

impl AppManifest {
    /// Load a manifest, or the empty manifest when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
