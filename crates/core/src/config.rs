//! Configuration sources
//!
//! Settings are looked up by string key through a `ConfigSource`. The
//! process environment (optionally seeded from a `.env` file), a TOML
//! settings file and plain in-memory maps all implement it, and
//! `LayeredSource` stacks them with first-hit-wins precedence.
//!
//! The settings file lives at ~/.config/bf/config.toml unless
//! `BF_CONFIG_DIR` points elsewhere.
//!
//! PROTECTED FILE: Changes to schema_version require migration support.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current settings file schema version
///
/// IMPORTANT: Bumping this version requires:
/// 1. Adding a migration in `SettingsManager::migrate`
/// 2. Updating migration tests
/// 3. Marking the change as BREAKING
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the settings directory
pub const CONFIG_DIR_ENV: &str = "BF_CONFIG_DIR";

/// A recognized setting: its primary key and the legacy key it also answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey {
    /// Primary key, e.g. an environment variable name
    pub name: &'static str,
    /// Legacy lowercase key, also the field name in the settings file
    pub legacy: &'static str,
}

pub mod keys {
    use super::ConfigKey;

    pub const CONNECTION_STRING: ConfigKey = ConfigKey {
        name: "AZURE_STORAGE_CONNECTION_STRING",
        legacy: "connection_string",
    };

    pub const CONTAINER: ConfigKey = ConfigKey {
        name: "CONTAINER_NAME",
        legacy: "container",
    };

    pub const PREFIX: ConfigKey = ConfigKey {
        name: "BLOB_PREFIX",
        legacy: "prefix",
    };

    pub const SUFFIX: ConfigKey = ConfigKey {
        name: "BLOB_SUFFIX",
        legacy: "suffix",
    };

    pub const ALL: [ConfigKey; 4] = [CONNECTION_STRING, CONTAINER, PREFIX, SUFFIX];
}

/// Read-only string-keyed settings lookup
///
/// An absent key is `None`, never an error.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Look up a recognized setting, trying the primary key before the legacy one
///
/// Empty values count as absent.
pub fn lookup(source: &dyn ConfigSource, key: ConfigKey) -> Option<String> {
    non_empty(source.get(key.name)).or_else(|| non_empty(source.get(key.legacy)))
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn new() -> Self {
        Self
    }

    /// Load `.env` from the working directory (or a parent) into the process
    /// environment, then read from the environment
    ///
    /// Variables already set in the environment win over the file. A missing
    /// file is not an error.
    pub fn with_dotenv() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
        }
        Self
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory settings
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Ordered stack of sources; the first non-empty value wins
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn ConfigSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority layer
    pub fn with(mut self, source: impl ConfigSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }
}

impl ConfigSource for LayeredSource {
    fn get(&self, key: &str) -> Option<String> {
        self.layers
            .iter()
            .find_map(|layer| non_empty(layer.get(key)))
    }
}

/// Contents of the settings file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Storage connection defaults
    #[serde(default)]
    pub storage: StorageSettings,
}

/// `[storage]` table of the settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl StorageSettings {
    /// Value for a recognized key, by primary or legacy name
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = find_key(key)?;
        self.field(key).as_deref()
    }

    /// Set or clear a recognized key, by primary or legacy name
    pub fn set(&mut self, key: &str, value: Option<String>) -> Result<()> {
        let key = find_key(key).ok_or_else(|| {
            let known: Vec<_> = keys::ALL.iter().map(|k| k.legacy).collect();
            Error::Config(format!(
                "Unknown setting '{key}'. Known settings: {}",
                known.join(", ")
            ))
        })?;
        *self.field_mut(key) = non_empty(value);
        Ok(())
    }

    fn field(&self, key: ConfigKey) -> &Option<String> {
        match key.legacy {
            "connection_string" => &self.connection_string,
            "container" => &self.container,
            "prefix" => &self.prefix,
            _ => &self.suffix,
        }
    }

    fn field_mut(&mut self, key: ConfigKey) -> &mut Option<String> {
        match key.legacy {
            "connection_string" => &mut self.connection_string,
            "container" => &mut self.container,
            "prefix" => &mut self.prefix,
            _ => &mut self.suffix,
        }
    }
}

fn find_key(key: &str) -> Option<ConfigKey> {
    keys::ALL
        .into_iter()
        .find(|k| k.name == key || k.legacy == key)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            storage: StorageSettings::default(),
        }
    }
}

/// Settings file exposed as a `ConfigSource`
///
/// Answers to both the primary and the legacy name of every recognized key.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    settings: Settings,
}

impl FileSource {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Load from the manager's path; a missing file gives an empty source
    pub fn load(manager: &SettingsManager) -> Result<Self> {
        Ok(Self::new(manager.load()?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl ConfigSource for FileSource {
    fn get(&self, key: &str) -> Option<String> {
        self.settings.storage.get(key).map(str::to_owned)
    }
}

/// Settings manager handles loading and saving the settings file
#[derive(Debug)]
pub struct SettingsManager {
    config_path: PathBuf,
}

impl SettingsManager {
    /// Create a SettingsManager with the default path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("bf"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a SettingsManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the settings file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load settings from disk
    ///
    /// If the file doesn't exist, returns default settings.
    /// If the schema version is older, migrates it.
    pub fn load(&self) -> Result<Settings> {
        if !self.config_path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.config_path).map_err(|e| {
            Error::Config(format!(
                "Failed to read {}: {e}",
                self.config_path.display()
            ))
        })?;
        let mut settings: Settings = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse {}: {e}",
                self.config_path.display()
            ))
        })?;

        if settings.schema_version < SCHEMA_VERSION {
            settings = self.migrate(settings);
        } else if settings.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade bf.",
                settings.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let write_err = |e: std::io::Error| {
            Error::Config(format!(
                "Failed to write {}: {e}",
                self.config_path.display()
            ))
        };

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = toml::to_string_pretty(settings)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions).map_err(write_err)?;
        }

        Ok(())
    }

    /// Migrate settings from an older schema version
    fn migrate(&self, mut settings: Settings) -> Settings {
        // No older schema exists yet; bumps add their steps here.
        settings.schema_version = SCHEMA_VERSION;
        settings
    }
}
