use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{AppConfig, ContactConfig};
use crate::core::assets::{AssetKind, AssetLibrary};
use crate::core::catalog::Catalog;
use crate::core::contact::{MessageSender, SimulatedSender};
use crate::core::modal::ScrollLock;
use crate::core::preference::{FileStore, PreferenceStore};
use crate::core::share::{open_in_browser, share_link, SharePlatform};

use super::events::{AppEvent, Notification, NotificationLevel};

/// Centralized handle to everything the views need outside their own state.
///
/// Created once at startup, then passed by reference to views. Shared
/// pieces are wrapped in Arc so background tasks can hold them.
pub struct Services {
    pub catalog: Arc<Catalog>,
    pub preferences: Arc<PreferenceStore>,
    pub assets: AssetLibrary,
    pub sender: Arc<dyn MessageSender>,
    pub scroll_lock: ScrollLock,
    pub contact: ContactConfig,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize all services from config.
    ///
    /// Only an explicitly configured catalog override can fail here.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = config.data_dir();
        log::info!("Initializing services with data dir: {}", data_dir.display());

        let catalog = match &config.data.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::embedded()?,
        };
        log::info!(
            "Catalog ready: {} projects, {} skills, {} certificates",
            catalog.projects.len(),
            catalog.skills.len(),
            catalog.certificates.len()
        );

        let preferences = Arc::new(PreferenceStore::open(Arc::new(FileStore::in_dir(
            &data_dir,
        ))));

        let assets = AssetLibrary::new(config.assets_dir(), config.download_dir());
        let sender: Arc<dyn MessageSender> =
            Arc::new(SimulatedSender::new(config.contact.simulated_latency()));

        Ok(Self::new(
            catalog,
            preferences,
            assets,
            sender,
            config.contact.clone(),
            event_tx,
        ))
    }

    pub fn new(
        catalog: Catalog,
        preferences: Arc<PreferenceStore>,
        assets: AssetLibrary,
        sender: Arc<dyn MessageSender>,
        contact: ContactConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            preferences,
            assets,
            sender,
            scroll_lock: ScrollLock::new(),
            contact,
            event_tx,
        }
    }

    /// Queue a notification for the overlay.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self.event_tx.send(AppEvent::Notification(Notification {
            id: 0, // Assigned by AppState
            message: message.into(),
            level,
            ttl_ticks: 0,
        }));
    }

    /// Copy an asset to the download directory and report the outcome.
    pub fn download(&self, kind: AssetKind, save_as: &str) {
        match self.assets.download(kind, save_as) {
            Ok(path) => self.notify(
                format!("Saved {}", path.display()),
                NotificationLevel::Success,
            ),
            Err(e) => {
                log::warn!("Download failed: {e}");
                self.notify(e.to_string(), NotificationLevel::Error);
            }
        }
    }

    /// Share a link and report the outcome.
    pub fn share(&self, platform: SharePlatform, url: &str, text: &str) {
        match share_link(platform, url, text) {
            Ok(()) if platform == SharePlatform::Clipboard => {
                self.notify("Link copied to clipboard", NotificationLevel::Success)
            }
            Ok(()) => self.notify(
                format!("Opened {} in your browser", platform.label()),
                NotificationLevel::Info,
            ),
            Err(e) => {
                log::warn!("Share failed: {e}");
                self.notify("Failed to share. Please try again.", NotificationLevel::Error);
            }
        }
    }

    /// Open an external link (GitHub, demo, certificate).
    pub fn open_link(&self, url: &str) {
        match open_in_browser(url) {
            Ok(()) => log::info!("Opened {url}"),
            Err(e) => {
                log::warn!("{e}");
                self.notify(format!("Could not open {url}"), NotificationLevel::Error);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::preference::MemoryStore;

    /// Services over the embedded catalog with in-memory preferences.
    pub fn services() -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let services = Services::new(
            Catalog::embedded().unwrap(),
            Arc::new(PreferenceStore::open(Arc::new(MemoryStore::new()))),
            AssetLibrary::new("/nonexistent/assets", std::env::temp_dir()),
            Arc::new(SimulatedSender::new(std::time::Duration::from_millis(10))),
            ContactConfig::default(),
            tx,
        );
        (services, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::services;
    use super::*;

    #[test]
    fn test_missing_download_notifies_error() {
        let (services, mut rx) = services();
        services.download(AssetKind::Resume, "Resume.pdf");
        match rx.try_recv().unwrap() {
            AppEvent::Notification(n) => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert!(n.message.contains("Resume"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_services_share_scroll_lock() {
        let (services, _rx) = services();
        let lock = services.scroll_lock.clone();
        let _guard = services.scroll_lock.acquire();
        assert!(lock.is_locked());
    }
}
