//! # Preference Resolver
//!
//! Restores the visitor's theme from a key-value preference store.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.get("theme")                                                     │
//! │                                                                         │
//! │  Ok(Some("dark"))     ──► Dark                                          │
//! │  Ok(Some(" Fresh "))  ──► Fresh       (trimmed, case-insensitive)       │
//! │  Ok(Some("neon"))     ──► Light       (unknown, logged at debug)        │
//! │  Ok(None)             ──► Light                                         │
//! │  Err(_)               ──► Light       (unreadable store, logged warn)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution only reads. Writing happens through [`PreferenceResolver::persist_theme`]
//! and only when the storefront is configured to persist theme changes.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use trafalgar_core::{ThemeId, DEFAULT_THEME, THEME_PREFERENCE_KEY};

use crate::config::{PreferenceBackend, PreferenceSettings};
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Preference Store Trait
// =============================================================================

/// The external key-value preference store.
pub trait PreferenceStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
}

/// Builds the store selected by the `[preferences]` config section.
pub fn store_from_settings(settings: &PreferenceSettings) -> ClientResult<Arc<dyn PreferenceStore>> {
    match settings.backend {
        PreferenceBackend::Memory => Ok(Arc::new(MemoryPreferenceStore::new())),
        PreferenceBackend::File => {
            let path = settings.resolved_path().ok_or_else(|| {
                ClientError::InvalidConfig("No preference file path available".into())
            })?;
            Ok(Arc::new(FilePreferenceStore::new(path)))
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Preference store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::PreferenceRead("preference store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::PreferenceWrite("preference store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Preference store kept in a flat TOML file.
///
/// ## File Format
/// ```toml
/// theme = "dark"
/// ```
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FilePreferenceStore { path: path.into() }
    }

    /// Returns the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ClientError::PreferenceRead(format!("{}: {}", self.path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| ClientError::PreferenceRead(format!("{}: {}", self.path.display(), e)))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.read_all().unwrap_or_else(|e| {
            warn!(error = %e, "Replacing unreadable preference file");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::PreferenceWrite(e.to_string()))?;
        }

        let contents =
            toml::to_string(&entries).map_err(|e| ClientError::PreferenceWrite(e.to_string()))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| ClientError::PreferenceWrite(format!("{}: {}", self.path.display(), e)))?;

        debug!(path = ?self.path, key, "Preference written");
        Ok(())
    }
}

// =============================================================================
// Preference Resolver
// =============================================================================

/// Reconciles the stored theme preference with the theme registry.
#[derive(Clone)]
pub struct PreferenceResolver {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceResolver {
    /// Wraps a preference store.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        PreferenceResolver { store }
    }

    /// Returns the stored theme, or the default theme.
    ///
    /// Never fails and never writes.
    pub fn resolve_theme(&self) -> ThemeId {
        match self.store.get(THEME_PREFERENCE_KEY) {
            Ok(Some(raw)) => match raw.parse::<ThemeId>() {
                Ok(theme) => {
                    debug!(%theme, "Restored theme preference");
                    theme
                }
                Err(e) => {
                    debug!(error = %e, fallback = %DEFAULT_THEME, "Ignoring stored theme");
                    DEFAULT_THEME
                }
            },
            Ok(None) => DEFAULT_THEME,
            Err(e) => {
                warn!(error = %e, fallback = %DEFAULT_THEME, "Theme preference unreadable");
                DEFAULT_THEME
            }
        }
    }

    /// Writes `theme` under the theme key.
    pub fn persist_theme(&self, theme: ThemeId) -> ClientResult<()> {
        self.store.set(THEME_PREFERENCE_KEY, theme.as_str())
    }
}

impl std::fmt::Debug for PreferenceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceResolver").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
