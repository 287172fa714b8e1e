//! # Storefront Configuration
//!
//! Configuration management for the storefront client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TRAFALGAR_CATALOG_URL=https://shop.example/api/products            │
//! │     TRAFALGAR_PERSIST_THEME=true                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/trafalgar-storefront/storefront.toml (Linux)             │
//! │     ~/Library/Application Support/au.com.trafalgar.storefront/...      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000/api/products, 30s timeout, light theme       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "Trafalgar Supermarket & Cellars"
//! tagline = "Your Local Store, Better Prices Every Day!"
//!
//! [catalog]
//! url = "https://trafalgar.example/api/products"
//! request_timeout_secs = 30   # 0 disables the timeout
//!
//! [preferences]
//! backend = "file"            # file | memory
//! path = "/var/lib/storefront/preferences.toml"
//! persist_on_change = false
//!
//! [session]
//! initial = "absent"          # present | absent
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::session::SessionPresence;

// =============================================================================
// Store Configuration
// =============================================================================

/// Branding shown in the header and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// One-line tagline under the name.
    #[serde(default = "default_tagline")]
    pub tagline: String,
}

fn default_store_name() -> String {
    "Trafalgar Supermarket & Cellars".to_string()
}

fn default_tagline() -> String {
    "Your Local Store, Better Prices Every Day!".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
            tagline: default_tagline(),
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where and how the catalog is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Catalog endpoint (http or https).
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Request timeout in seconds. 0 disables the timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_catalog_url() -> String {
    "http://localhost:3000/api/products".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            url: default_catalog_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl CatalogSettings {
    /// Returns the request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

// =============================================================================
// Preference Settings
// =============================================================================

/// Which preference store backs the theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceBackend {
    /// TOML file on disk.
    #[default]
    File,

    /// Process memory; nothing survives a restart.
    Memory,
}

impl std::fmt::Display for PreferenceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceBackend::File => write!(f, "file"),
            PreferenceBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for PreferenceBackend {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "disk" => Ok(PreferenceBackend::File),
            "memory" | "mem" => Ok(PreferenceBackend::Memory),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown preference backend: '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

/// Theme preference storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceSettings {
    /// Storage backend.
    #[serde(default)]
    pub backend: PreferenceBackend,

    /// Preference file for the file backend.
    /// Defaults to `preferences.toml` in the platform config directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Write the theme back to the store whenever it changes.
    #[serde(default)]
    pub persist_on_change: bool,
}

impl PreferenceSettings {
    /// Returns the preference file path, explicit or platform default.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.config_dir().join("preferences.toml")))
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Settings for the bundled in-memory session provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Presence at startup.
    #[serde(default)]
    pub initial: SessionPresence,
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Store branding.
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog endpoint settings.
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Theme preference settings.
    #[serde(default)]
    pub preferences: PreferenceSettings,

    /// Session settings.
    #[serde(default)]
    pub session: SessionSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.catalog.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "Catalog URL must start with http:// or https://, got: {}",
                self.catalog.url
            )));
        }

        if self.store.name.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "store.name must not be empty".into(),
            ));
        }

        if self.preferences.backend == PreferenceBackend::File
            && self.preferences.resolved_path().is_none()
        {
            return Err(ClientError::InvalidConfig(
                "preferences.path is required when no config directory is available".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TRAFALGAR_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.url = url;
        }

        if let Ok(timeout) = std::env::var("TRAFALGAR_REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.request_timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric request timeout"),
            }
        }

        if let Ok(path) = std::env::var("TRAFALGAR_PREFERENCES_PATH") {
            debug!(path = %path, "Overriding preference path from environment");
            self.preferences.path = Some(PathBuf::from(path));
        }

        if let Ok(backend) = std::env::var("TRAFALGAR_PREFERENCES_BACKEND") {
            match backend.parse() {
                Ok(parsed) => self.preferences.backend = parsed,
                Err(_) => warn!(backend = %backend, "Unknown preference backend in environment"),
            }
        }

        if let Ok(persist) = std::env::var("TRAFALGAR_PERSIST_THEME") {
            match persist.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.preferences.persist_on_change = true,
                "0" | "false" | "no" | "off" => self.preferences.persist_on_change = false,
                _ => warn!(value = %persist, "Ignoring unrecognised TRAFALGAR_PERSIST_THEME"),
            }
        }

        if let Ok(name) = std::env::var("TRAFALGAR_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(session) = std::env::var("TRAFALGAR_SESSION") {
            match session.parse() {
                Ok(presence) => self.session.initial = presence,
                Err(_) => warn!(value = %session, "Unknown session presence in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns true if theme changes are written back to the store.
    pub fn persist_on_change(&self) -> bool {
        self.preferences.persist_on_change
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("au.com", "trafalgar", "storefront")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog.url, "http://localhost:3000/api/products");
        assert_eq!(config.catalog.request_timeout_secs, 30);
        assert!(!config.persist_on_change());
        assert_eq!(config.preferences.backend, PreferenceBackend::File);
        assert_eq!(config.session.initial, SessionPresence::Absent);
        assert_eq!(config.store.name, "Trafalgar Supermarket & Cellars");
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let mut settings = CatalogSettings::default();
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
        settings.request_timeout_secs = 0;
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();
        config.preferences.path = Some(PathBuf::from("/tmp/prefs.toml"));
        assert!(config.validate().is_ok());

        config.catalog.url = "ftp://catalog.example/products".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.catalog.url = "not a url".to_string();
        assert!(config.validate().unwrap_err().is_config_error());

        config.catalog.url = "https://catalog.example/api/products".to_string();
        assert!(config.validate().is_ok());

        config.store.name = "   ".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("file".parse::<PreferenceBackend>().unwrap(), PreferenceBackend::File);
        assert_eq!("MEMORY".parse::<PreferenceBackend>().unwrap(), PreferenceBackend::Memory);
        assert!("redis".parse::<PreferenceBackend>().is_err());
    }

    #[test]
    fn test_toml_parsing_with_partial_sections() {
        let toml_str = r#"
            [catalog]
            url = "https://trafalgar.example/api/products"

            [preferences]
            backend = "memory"
            persist_on_change = true

            [session]
            initial = "present"
        "#;

        let config: StorefrontConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.url, "https://trafalgar.example/api/products");
        assert_eq!(config.catalog.request_timeout_secs, 30);
        assert_eq!(config.preferences.backend, PreferenceBackend::Memory);
        assert!(config.persist_on_change());
        assert_eq!(config.session.initial, SessionPresence::Present);
        assert_eq!(config.store.tagline, "Your Local Store, Better Prices Every Day!");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            r#"
                [catalog]
                url = "https://catalog.example/products"

                [preferences]
                backend = "memory"
            "#,
        )
        .unwrap();

        let loaded = StorefrontConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.preferences.backend, PreferenceBackend::Memory);
        assert!(loaded.catalog.url.starts_with("http"));
    }

    #[test]
    fn test_load_rejects_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[catalog\nurl = ").unwrap();

        let err = StorefrontConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, ClientError::ConfigLoadFailed(_)));
        assert!(err.is_config_error());
    }
}
