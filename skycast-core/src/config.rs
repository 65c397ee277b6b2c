use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

pub const DEFAULT_EXPORT_PATH: &str = "forecasts.csv";

/// Per-provider overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
}

/// Where and whether the forecast series is dumped to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { enabled: true, path: PathBuf::from(DEFAULT_EXPORT_PATH) }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Example TOML:
    /// [providers.7timer]
    /// base_url = "..."
    pub providers: HashMap<String, ProviderConfig>,

    pub export: ExportConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Configured endpoint for a provider, falling back to its public API.
    pub fn provider_base_url(&self, id: ProviderId) -> &str {
        self.provider_config(id).map_or(id.default_base_url(), |cfg| cfg.base_url.as_str())
    }

    pub fn upsert_provider_base_url(&mut self, id: ProviderId, base_url: String) {
        self.providers.insert(id.as_str().to_string(), ProviderConfig { base_url });
    }

    /// Drop any override so the public endpoint is used again.
    pub fn reset_provider(&mut self, id: ProviderId) -> bool {
        self.providers.remove(id.as_str()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let cfg = Config::default();

        assert_eq!(
            cfg.provider_base_url(ProviderId::SevenTimer),
            "https://www.7timer.info/bin/astro.php"
        );
        assert_eq!(
            cfg.provider_base_url(ProviderId::SunriseSunset),
            "https://api.sunrise-sunset.org/json"
        );
        assert!(cfg.export.enabled);
        assert_eq!(cfg.export.path, PathBuf::from("forecasts.csv"));
    }

    #[test]
    fn upsert_overrides_only_that_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_base_url(ProviderId::SevenTimer, "http://mirror/astro.php".into());

        assert_eq!(cfg.provider_base_url(ProviderId::SevenTimer), "http://mirror/astro.php");
        assert_eq!(
            cfg.provider_base_url(ProviderId::SunriseSunset),
            ProviderId::SunriseSunset.default_base_url()
        );
    }

    #[test]
    fn reset_provider_restores_default() {
        let mut cfg = Config::default();
        cfg.upsert_provider_base_url(ProviderId::SunriseSunset, "http://mirror/json".into());

        assert!(cfg.reset_provider(ProviderId::SunriseSunset));
        assert!(!cfg.reset_provider(ProviderId::SunriseSunset));
        assert_eq!(
            cfg.provider_base_url(ProviderId::SunriseSunset),
            ProviderId::SunriseSunset.default_base_url()
        );
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: Config = toml::from_str(
            r#"
            [providers.7timer]
            base_url = "http://localhost:9000/astro.php"

            [export]
            enabled = false
            "#,
        )
        .expect("partial config must parse");

        assert_eq!(cfg.provider_base_url(ProviderId::SevenTimer), "http://localhost:9000/astro.php");
        assert!(!cfg.export.enabled);
        assert_eq!(cfg.export.path, PathBuf::from(DEFAULT_EXPORT_PATH));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.upsert_provider_base_url(ProviderId::SevenTimer, "http://mirror/astro.php".into());
        cfg.export.path = PathBuf::from("out/astro.csv");
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider_base_url(ProviderId::SevenTimer), "http://mirror/astro.php");
        assert_eq!(loaded.export, cfg.export);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert!(cfg.providers.is_empty());
        assert_eq!(cfg.export, ExportConfig::default());
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "export = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
