use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub contact: ContactConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
    /// Draw the animated starfield behind the content.
    pub backdrop: bool,
    /// Number of stars in the backdrop.
    pub star_count: usize,
}

/// Where things live on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
    /// Directory holding the downloadable PDFs. Defaults to `<data_dir>/assets`.
    pub assets_dir: Option<PathBuf>,
    /// Where downloads are saved. Defaults to the user's download directory.
    pub download_dir: Option<PathBuf>,
    /// Replace the built-in catalog with this JSON file.
    pub catalog_path: Option<PathBuf>,
}

/// Contact form behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Seconds the success/error banner stays before returning to idle.
    pub status_reset_secs: u64,
    /// Artificial delivery delay of the built-in sender.
    pub simulated_latency_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: true,
            backdrop: true,
            star_count: 80,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            status_reset_secs: 4,
            simulated_latency_ms: 1000,
        }
    }
}

impl TuiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

impl ContactConfig {
    pub fn status_reset(&self) -> Duration {
        Duration::from_secs(self.status_reset_secs)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/folio/config.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error; callers fall back to defaults and report
    /// it once logging is up.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: config_path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("folio"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.data
            .assets_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("assets"))
    }

    pub fn download_dir(&self) -> PathBuf {
        self.data.download_dir.clone().unwrap_or_else(|| {
            dirs::download_dir().unwrap_or_else(|| self.data_dir().join("downloads"))
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("folio").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert!(config.tui.backdrop);
        assert_eq!(config.contact.status_reset(), Duration::from_secs(4));
        assert_eq!(config.contact.simulated_latency(), Duration::from_millis(1000));
        assert!(config.data.data_dir.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = AppConfig::load_from(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(config.tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_config_load_invalid_reports_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tui = [not valid").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[contact]\nstatus_reset_secs = 2\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.contact.status_reset_secs, 2);
        assert_eq!(config.contact.simulated_latency_ms, 1000);
        assert_eq!(config.tui.star_count, 80);
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
        assert_eq!(config.assets_dir(), PathBuf::from("/tmp/custom/assets"));
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let mut config = AppConfig::default();
        config.tui.tick_rate_ms = 0;
        assert_eq!(config.tui.tick_rate(), Duration::from_millis(1));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.tui.tick_rate_ms, config.tui.tick_rate_ms);
        assert_eq!(
            deserialized.contact.status_reset_secs,
            config.contact.status_reset_secs
        );
    }
}
