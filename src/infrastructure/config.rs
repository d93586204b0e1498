// src/infrastructure/config.rs
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BIND, DEFAULT_TABLE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration file
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings the store client is constructed from.
///
/// `url` and `anon_key` stay optional here; the client refuses to build
/// without them.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_table() -> String { DEFAULT_TABLE.to_string() }
fn default_bind() -> String { DEFAULT_BIND.to_string() }

impl StoreConfig {
    pub fn new(url: Option<&str>, anon_key: Option<&str>) -> Self {
        Self {
            url: url.map(str::to_string),
            anon_key: anon_key.map(str::to_string),
            table: default_table(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file {}", path.as_ref().display())
        })?;

        let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load an explicitly requested file, or the default file when it exists.
    ///
    /// A missing explicit file is an error; a missing default file yields defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }

        match default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default path");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Layer environment/CLI values over the file. Blank values are ignored.
    pub fn with_overrides(mut self, store_url: Option<&str>, anon_key: Option<&str>) -> Self {
        if let Some(url) = non_blank(store_url) {
            self.store.url = Some(url);
        }
        if let Some(key) = non_blank(anon_key) {
            self.store.anon_key = Some(key);
        }
        self
    }
}

/// `<config dir>/companion-library/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let toml_content = r#"
[store]
url = "https://abc.supabase.co"
anon_key = "anon-123"
table = "tutors"

[server]
bind = "0.0.0.0:8080"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.store.url.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(config.store.anon_key.as_deref(), Some("anon-123"));
        assert_eq!(config.store.table, "tutors");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[store]\nurl = \"https://abc.supabase.co\"\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.store.anon_key, None);
        assert_eq!(config.store.table, DEFAULT_TABLE);
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn given_missing_explicit_file_when_resolving_then_returns_error() {
        let result = Config::resolve(Some(Path::new("/nonexistent/path/config.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn given_overrides_when_layering_then_non_blank_values_win() {
        let config = Config {
            store: StoreConfig::new(Some("https://file.supabase.co"), Some("file-key")),
            ..Default::default()
        };

        let config = config.with_overrides(Some("https://env.supabase.co"), Some("  "));

        assert_eq!(config.store.url.as_deref(), Some("https://env.supabase.co"));
        assert_eq!(config.store.anon_key.as_deref(), Some("file-key"));
    }
}
