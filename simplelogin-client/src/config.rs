// simplelogin-client/src/config.rs
use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use simplelogin_api::DEFAULT_BASE_URL;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "SIMPLELOGIN_API_KEY";
pub const BASE_URL_ENV: &str = "SIMPLELOGIN_BASE_URL";

/// Persisted settings (`config.toml`)
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key for the `Authentication` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Fully resolved settings handed to the API client
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

impl Settings {
    /// Apply command-line values on top of the resolved layers
    pub fn with_overrides(mut self, base_url: Option<&str>, api_key: Option<&str>) -> Self {
        if let Some(url) = non_blank(base_url) {
            self.base_url = url.to_string();
        }
        if let Some(key) = non_blank(api_key) {
            self.api_key = key.to_string();
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// An unparsable file is skipped with a warning so `set-key` can replace it
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("ignoring invalid config file {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    /// Save to the default location, returning the path written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs
            .config_dir()
            .join("simplelogin-cli")
            .join("config.toml"))
    }

    /// Layer environment over file over defaults. `env` looks up a variable.
    pub fn resolve<F>(&self, env: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, file: &Option<String>| {
            env(var)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.clone().filter(|v| !v.trim().is_empty()))
        };

        Settings {
            base_url: pick(BASE_URL_ENV, &self.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: pick(API_KEY_ENV, &self.api_key).unwrap_or_default(),
        }
    }

    pub fn resolve_from_env(&self) -> Settings {
        self.resolve(|var| std::env::var(var).ok())
    }
}
