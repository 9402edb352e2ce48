//! Persisted light/dark theme preference.
//!
//! The value is read once when the store opens and then lives in a
//! `watch` channel: every section observes the same state instead of
//! keeping its own copy. Writes go to the in-memory channel first and
//! then to the backing [`KeyValueStore`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::watch;

/// Storage key holding the theme.
pub const THEME_KEY: &str = "theme";

/// File name of the JSON preference file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("preference I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unknown theme '{0}' (expected light or dark)")]
    UnknownTheme(String),

    #[error("preference backend is poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Exact stored values only; anything else is treated as absent.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| PreferenceError::UnknownTheme(s.to_string()))
    }
}

// ── Backends ────────────────────────────────────────────────────────────────

/// Minimal string key/value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// JSON object on disk, e.g. `{"theme": "dark"}`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/preferences.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; unreadable or malformed files read as empty.
    fn read_map(&self) -> BTreeMap<String, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!("Cannot read {}: {e}", self.path.display());
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(e) => {
                log::warn!(
                    "Ignoring malformed preferences at {}: {e}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&map)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .lock()
            .map_err(|_| PreferenceError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Store ───────────────────────────────────────────────────────────────────

pub struct PreferenceStore {
    backend: Arc<dyn KeyValueStore>,
    theme: watch::Sender<ThemePreference>,
}

impl PreferenceStore {
    /// Read the persisted theme once; absent or invalid means light.
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let initial = match backend.get(THEME_KEY) {
            Some(raw) => ThemePreference::parse(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring stored theme '{raw}', using light");
                ThemePreference::Light
            }),
            None => ThemePreference::Light,
        };
        log::debug!("Theme preference loaded: {initial}");
        let (theme, _) = watch::channel(initial);
        Self { backend, theme }
    }

    pub fn get(&self) -> ThemePreference {
        *self.theme.borrow()
    }

    /// Notify observers, then persist.
    ///
    /// A persistence failure is returned but the in-memory value has already
    /// changed, so the UI keeps the user's choice for this session.
    pub fn set(&self, value: ThemePreference) -> Result<(), PreferenceError> {
        self.theme.send_replace(value);
        self.backend.set(THEME_KEY, value.as_str())
    }

    /// Flip the theme and return the new value.
    pub fn toggle(&self) -> Result<ThemePreference, PreferenceError> {
        let next = self.get().toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemePreference> {
        self.theme.subscribe()
    }
}
