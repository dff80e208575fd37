use crate::error::{Result, VtexDevError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_DIR: &str = ".vtex-dev";

pub const ENV_RUNTIME: &str = "VTEX_DEV_RUNTIME";
pub const ENV_PLATFORM_CLI: &str = "VTEX_DEV_PLATFORM_CLI";

/// Per-project configuration, stored in `.vtex-dev/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DevConfig {
    /// Container runtime binary (docker, podman, ...)
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Platform CLI binary
    #[serde(default = "default_platform_cli")]
    pub platform_cli: String,

    #[serde(default = "default_container_name")]
    pub container_name: String,

    /// Image repository; tags are derived per command
    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_network")]
    pub network: String,

    /// How many times `dev` polls the container's health before giving up
    #[serde(default = "default_health_probes")]
    pub health_probes: u32,

    #[serde(default = "default_health_interval_ms")]
    pub health_interval_ms: u64,

    /// Account used by `login` when none is given and no session exists
    #[serde(default)]
    pub default_account: Option<String>,
}

fn default_runtime() -> String {
    "docker".to_string()
}

fn default_platform_cli() -> String {
    "vtex".to_string()
}

fn default_container_name() -> String {
    "vtex-dev".to_string()
}

fn default_image() -> String {
    "vtex-dev".to_string()
}

fn default_network() -> String {
    "vtex-dev-net".to_string()
}

fn default_health_probes() -> u32 {
    30
}

fn default_health_interval_ms() -> u64 {
    1000
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            platform_cli: default_platform_cli(),
            container_name: default_container_name(),
            image: default_image(),
            network: default_network(),
            health_probes: default_health_probes(),
            health_interval_ms: default_health_interval_ms(),
            default_account: None,
        }
    }
}

impl DevConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DevConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Applies `VTEX_DEV_RUNTIME` / `VTEX_DEV_PLATFORM_CLI` overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_RUNTIME).ok(),
            std::env::var(ENV_PLATFORM_CLI).ok(),
        )
    }

    fn with_overrides(mut self, runtime: Option<String>, platform_cli: Option<String>) -> Self {
        if let Some(runtime) = runtime.filter(|v| !v.is_empty()) {
            self.runtime = runtime;
        }
        if let Some(cli) = platform_cli.filter(|v| !v.is_empty()) {
            self.platform_cli = cli;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("runtime", &self.runtime),
            ("platform_cli", &self.platform_cli),
            ("container_name", &self.container_name),
            ("image", &self.image),
            ("network", &self.network),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(VtexDevError::Config(format!("'{}' must not be empty", key)));
            }
        }
        if self.health_probes == 0 {
            return Err(VtexDevError::Config(
                "'health_probes' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn image_tag(&self, tag: &str) -> String {
        format!("{}:{}", self.image, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DevConfig::default();
        assert_eq!(config.runtime, "docker");
        assert_eq!(config.platform_cli, "vtex");
        assert_eq!(config.image_tag("latest"), "vtex-dev:latest");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = DevConfig::load(dir.path()).unwrap();
        assert_eq!(config, DevConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);

        let config = DevConfig {
            runtime: "podman".to_string(),
            health_probes: 5,
            ..DevConfig::default()
        };
        config.save(&config_dir).unwrap();

        let loaded = DevConfig::load(&config_dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "container_name": "store-front" }"#,
        )
        .unwrap();

        let loaded = DevConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.container_name, "store-front");
        assert_eq!(loaded.network, "vtex-dev-net");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "health_probes": 0 }"#,
        )
        .unwrap();

        let err = DevConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, VtexDevError::Config(_)));
    }

    #[test]
    fn test_overrides_skip_empty_values() {
        let config =
            DevConfig::default().with_overrides(Some("podman".into()), Some(String::new()));
        assert_eq!(config.runtime, "podman");
        assert_eq!(config.platform_cli, "vtex");
    }
}
