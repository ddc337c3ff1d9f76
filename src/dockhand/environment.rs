use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::PlatformConfig;
use crate::error::Result;
use crate::manifest::AppManifest;
use crate::model::AppId;
use crate::secrets::Seed;

/// Fixed variable names exported to every app.
pub const ENV_APP_ID: &str = "APP_ID";
pub const ENV_APP_DATA_DIR: &str = "APP_DATA_DIR";
pub const ENV_APP_DOMAIN: &str = "APP_DOMAIN";
pub const ENV_APP_HIDDEN_SERVICE: &str = "APP_HIDDEN_SERVICE";
pub const ENV_APP_SEED: &str = "APP_SEED";
pub const ENV_APP_PASSWORD: &str = "APP_PASSWORD";

/// Exported in place of an onion address until tor has provisioned one.
pub const ONION_PLACEHOLDER: &str = "unprovisioned.onion";

static DEVICE_DOMAIN: Lazy<String> = Lazy::new(|| {
    if let Ok(domain) = env::var("DOCKHAND_DOMAIN") {
        if !domain.is_empty() {
            return domain;
        }
    }
    let hostname = Command::new("hostname")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "localhost".to_string());
    format!("{}.local", hostname)
});

/// The `.local` domain the device is reachable under, or the
/// `DOCKHAND_DOMAIN` override.
pub fn device_domain() -> &'static str {
    &DEVICE_DOMAIN
}

/// Assemble the environment handed to the orchestrator for `id`: the fixed
/// base set plus everything the app's manifest declares.
pub fn compose_env(
    config: &PlatformConfig,
    seed: &Seed,
    id: &AppId,
    manifest: &AppManifest,
) -> Result<BTreeMap<String, String>> {
    let mut env = BTreeMap::new();
    env.insert(ENV_APP_ID.to_string(), id.to_string());
    env.insert(
        ENV_APP_DATA_DIR.to_string(),
        config.app_data_dir(id).display().to_string(),
    );
    env.insert(ENV_APP_DOMAIN.to_string(), device_domain().to_string());
    env.insert(
        ENV_APP_HIDDEN_SERVICE.to_string(),
        read_hostname_file(&config.hidden_service_hostname(id)),
    );
    env.insert(
        ENV_APP_SEED.to_string(),
        seed.derive(&format!("app-{}-seed", id))?,
    );
    env.insert(
        ENV_APP_PASSWORD.to_string(),
        seed.derive(&format!("app-{}-password", id))?,
    );

    for secret in &manifest.secrets {
        env.insert(secret.env.clone(), seed.derive(&secret.label)?);
    }
    for service in &manifest.hidden_services {
        let path = config.tor_data_dir().join(&service.hostname_file);
        env.insert(service.env.clone(), read_hostname_file(&path));
    }
    for address in &manifest.addresses {
        env.insert(address.env.clone(), address.value.clone());
    }
    Ok(env)
}

/// Trimmed hostname file contents, or the placeholder when the file is
/// missing or empty (tor has not provisioned the service yet).
fn read_hostname_file(path: &Path) -> String {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ONION_PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{AddressBinding, HiddenServiceRequirement, SecretRequirement};

    fn fixture() -> (tempfile::TempDir, PlatformConfig, Seed, AppId) {
        let dir = tempfile::tempdir().unwrap();
        let config = PlatformConfig::new(dir.path().to_path_buf());
        let seed = Seed::from_material("test seed material").unwrap();
        let id = AppId::new("wallet").unwrap();
        (dir, config, seed, id)
    }

    #[test]
    fn base_environment_is_complete() {
        let (_dir, config, seed, id) = fixture();
        let env = compose_env(&config, &seed, &id, &AppManifest::default()).unwrap();

        assert_eq!(env[ENV_APP_ID], "wallet");
        assert_eq!(
            env[ENV_APP_DATA_DIR],
            config.app_data_dir(&id).display().to_string()
        );
        assert_eq!(env[ENV_APP_HIDDEN_SERVICE], ONION_PLACEHOLDER);
        assert_eq!(env[ENV_APP_SEED], seed.derive("app-wallet-seed").unwrap());
        assert_eq!(
            env[ENV_APP_PASSWORD],
            seed.derive("app-wallet-password").unwrap()
        );
        assert!(env[ENV_APP_DOMAIN].contains('.'));
    }

    #[test]
    fn provisioned_hidden_service_is_read() {
        let (_dir, config, seed, id) = fixture();
        let hostname_path = config.hidden_service_hostname(&id);
        fs::create_dir_all(hostname_path.parent().unwrap()).unwrap();
        fs::write(&hostname_path, "walletxyz.onion\n").unwrap();

        let env = compose_env(&config, &seed, &id, &AppManifest::default()).unwrap();
        assert_eq!(env[ENV_APP_HIDDEN_SERVICE], "walletxyz.onion");
    }

    #[test]
    fn manifest_entries_resolve() {
        let (_dir, config, seed, id) = fixture();
        let node_hostname = config.tor_data_dir().join("node").join("hostname");
        fs::create_dir_all(node_hostname.parent().unwrap()).unwrap();
        fs::write(&node_hostname, "nodeabc.onion\n").unwrap();

        let manifest = AppManifest {
            secrets: vec![SecretRequirement {
                env: "WALLET_API_KEY".into(),
                label: "wallet-api-key".into(),
            }],
            hidden_services: vec![
                HiddenServiceRequirement {
                    env: "NODE_ONION".into(),
                    hostname_file: "node/hostname".into(),
                },
                HiddenServiceRequirement {
                    env: "MISSING_ONION".into(),
                    hostname_file: "missing/hostname".into(),
                },
            ],
            addresses: vec![AddressBinding {
                env: "SERVER_IP".into(),
                value: "10.21.22.2".into(),
            }],
        };

        let env = compose_env(&config, &seed, &id, &manifest).unwrap();
        assert_eq!(env["WALLET_API_KEY"], seed.derive("wallet-api-key").unwrap());
        assert_eq!(env["NODE_ONION"], "nodeabc.onion");
        assert_eq!(env["MISSING_ONION"], ONION_PLACEHOLDER);
        assert_eq!(env["SERVER_IP"], "10.21.22.2");
    }

    #[test]
    fn manifest_secret_with_empty_label_fails() {
        let (_dir, config, seed, id) = fixture();
        let manifest = AppManifest {
            secrets: vec![SecretRequirement {
                env: "BROKEN".into(),
                label: String::new(),
            }],
            ..Default::default()
        };
        assert!(compose_env(&config, &seed, &id, &manifest).is_err());
    }
}
