use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fs;
use std::path::Path;

use crate::config::PlatformConfig;
use crate::error::{DockhandError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Master seed backing all per-app secret derivation.
///
/// Derived values are never stored anywhere: the same seed and label always
/// yield the same digest, so every invocation recomputes them from scratch.
pub struct Seed {
    material: String,
}

impl Seed {
    /// Load the seed, preferring the primary path and falling back to the
    /// location left behind by in-place platform upgrades. Missing or empty
    /// seed material is fatal.
    pub fn load(config: &PlatformConfig) -> Result<Self> {
        let primary = config.seed_path();
        if let Some(material) = read_seed_file(&primary)? {
            return Ok(Self { material });
        }
        if let Some(material) = read_seed_file(&config.upgrade_seed_path())? {
            return Ok(Self { material });
        }
        Err(DockhandError::EmptySeed(primary))
    }

    /// Build a seed from raw material. Rejects empty input for the same
    /// reason `load` does: an empty key produces predictable digests.
    pub fn from_material(material: &str) -> Result<Self> {
        let trimmed = material.trim();
        if trimmed.is_empty() {
            return Err(DockhandError::EmptySeed(Default::default()));
        }
        Ok(Self {
            material: trimmed.to_string(),
        })
    }

    /// Keyed digest of `label`: hex(HMAC-SHA256(seed, label)).
    pub fn derive(&self, label: &str) -> Result<String> {
        if label.is_empty() {
            return Err(DockhandError::EmptyLabel);
        }
        let mut mac = HmacSha256::new_from_slice(self.material.as_bytes())
            .map_err(|err| DockhandError::Store(format!("hmac rejected seed material: {err}")))?;
        mac.update(label.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

fn read_seed_file(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
