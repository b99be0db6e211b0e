//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RXCART_STORAGE_BACKEND=file                                        │
//! │     RXCART_STORAGE_DIR=/var/lib/rxcart                                 │
//! │     RXCART_CART_KEY=cartItems                                          │
//! │     RXCART_NOTIFICATIONS=false                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/rxcart/cart.toml (Linux)                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     file backend in the platform data dir, key "cartItems"             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "file"   # memory | file
//! dir = "/var/lib/rxcart"
//! cart_key = "cartItems"
//!
//! [notifications]
//! enabled = true
//! capacity = 64
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use rxcart_core::DEFAULT_CART_KEY;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::notify::{Notifier, SilentNotifier, ToastChannel};
use crate::storage::{validate_key, FileStorage, KeyValueStorage, MemoryStorage};

// =============================================================================
// Storage Settings
// =============================================================================

/// Which [`KeyValueStorage`] to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Nothing survives a restart.
    Memory,
    /// One JSON file per key.
    #[default]
    File,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" | "disk" => Ok(StorageBackend::File),
            other => Err(ConfigError::Invalid(format!(
                "Unknown storage backend: '{}'. Valid options: memory, file",
                other
            ))),
        }
    }
}

/// Where the cart snapshot is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend. Defaults to the platform data dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Key the snapshot is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            dir: None,
            cart_key: default_cart_key(),
        }
    }
}

// =============================================================================
// Notification Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// When false, toasts are dropped.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Unread toasts buffered per subscriber.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> usize {
    64
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            enabled: true,
            capacity: default_capacity(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`cart.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document and validates it. No environment overrides.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_key(&self.storage.cart_key)
            .map_err(|e| ConfigError::Invalid(format!("storage.cart_key: {}", e)))?;

        if self.notifications.capacity == 0 {
            return Err(ConfigError::Invalid(
                "notifications.capacity must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `RXCART_*` overrides looked up through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("RXCART_STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
            debug!(backend = %self.storage.backend, "Overriding storage backend from environment");
        }

        if let Some(dir) = lookup("RXCART_STORAGE_DIR") {
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("RXCART_CART_KEY") {
            debug!(key = %key, "Overriding cart key from environment");
            self.storage.cart_key = key;
        }

        if let Some(flag) = lookup("RXCART_NOTIFICATIONS") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => self.notifications.enabled = true,
                "0" | "false" | "off" | "no" => self.notifications.enabled = false,
                _ => warn!(value = %flag, "Unknown RXCART_NOTIFICATIONS value, ignoring"),
            }
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rxcart", "rxcart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    /// Directory the file backend writes to.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "rxcart", "rxcart")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from("rxcart-data"))
    }

    /// Builds the configured storage backend.
    pub fn build_storage(&self) -> ConfigResult<Arc<dyn KeyValueStorage>> {
        validate_key(&self.storage.cart_key)
            .map_err(|e| ConfigError::Invalid(format!("storage.cart_key: {}", e)))?;

        let storage: Arc<dyn KeyValueStorage> = match self.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => {
                let dir = self.storage_dir();
                info!(?dir, "Using file-backed cart storage");
                Arc::new(FileStorage::new(dir))
            }
        };
        Ok(storage)
    }

    /// Builds the notifier for the store, plus the toast channel the UI
    /// subscribes to when notifications are enabled.
    pub fn build_notifier(&self) -> (Arc<dyn Notifier>, Option<ToastChannel>) {
        if !self.notifications.enabled {
            return (Arc::new(SilentNotifier), None);
        }
        let channel = ToastChannel::new(self.notifications.capacity);
        (Arc::new(channel.clone()), Some(channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.cart_key, "cartItems");
        assert!(config.notifications.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("FILE".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert!("s3".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = CartConfig::from_toml(
            r#"
            [storage]
            backend = "memory"

            [notifications]
            capacity = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.cart_key, "cartItems");
        assert_eq!(config.notifications.capacity, 8);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn test_validation() {
        let mut config = CartConfig::default();
        config.storage.cart_key = "../cart".to_string();
        assert!(config.validate().is_err());

        let mut config = CartConfig::default();
        config.notifications.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CartConfig::default();
        config
            .apply_overrides(lookup(&[
                ("RXCART_STORAGE_BACKEND", "memory"),
                ("RXCART_STORAGE_DIR", "/tmp/rx"),
                ("RXCART_CART_KEY", "cart_v2"),
                ("RXCART_NOTIFICATIONS", "off"),
            ]))
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.dir, Some(PathBuf::from("/tmp/rx")));
        assert_eq!(config.storage.cart_key, "cart_v2");
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn test_bad_backend_override_is_an_error() {
        let mut config = CartConfig::default();
        assert!(config
            .apply_overrides(lookup(&[("RXCART_STORAGE_BACKEND", "cloud")]))
            .is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[storage]\ncart_key = \"pharmacyCart\"\n").unwrap();

        let config = CartConfig::load(Some(path)).unwrap();
        // Environment may override the key on a developer machine.
        if std::env::var("RXCART_CART_KEY").is_err() {
            assert_eq!(config.storage.cart_key, "pharmacyCart");
        }
    }

    #[test]
    fn test_build_storage_uses_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CartConfig::default();
        config.storage.dir = Some(dir.path().to_path_buf());

        let storage = config.build_storage().unwrap();
        storage.set("cartItems", "[]").unwrap();
        assert!(dir.path().join("cartItems.json").exists());
    }

    #[test]
    fn test_build_notifier_respects_enabled_flag() {
        let mut config = CartConfig::default();
        assert!(config.build_notifier().1.is_some());

        config.notifications.enabled = false;
        assert!(config.build_notifier().1.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&CartConfig::default()).unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[notifications]"));
    }
}
