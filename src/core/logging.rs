//! File logging for the terminal UI.
//!
//! The TUI owns stdout, so everything goes to a daily rolling JSON log in
//! the data directory. Application code logs through the `log` facade and the
//! subscriber bridges those records into tracing; this module emits its own
//! events through tracing directly.

use std::fs;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_PREFIX: &str = "folio.log";

/// `<data_dir>/logs`, or `./logs` when no data dir is known.
pub fn default_log_dir(data_dir: Option<&Path>) -> PathBuf {
    data_dir
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize file-only logging.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered records are flushed on shutdown.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer: the TUI owns the terminal
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let log_dir_clone = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    tracing::info!(
        log_file = %log_dir.join(LOG_FILE_PREFIX).display(),
        rotation = "daily",
        "Logging initialized"
    );

    guard
}

/// Rolled-over logs from previous days that are not yet compressed.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_PREFIX}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

fn compress_old_logs(log_dir: &Path) {
    // The daily appender dates files in UTC
    let today_suffix = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "Compressed old log"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to compress old log"),
        }
    }
}

fn compress_file(path: &Path) -> std::io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    // Skip if already exists
    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    std::io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_should_compress() {
        let today = "2026-10-18";
        assert!(should_compress("folio.log.2026-10-17", today));
        assert!(!should_compress("folio.log.2026-10-18", today));
        assert!(!should_compress("folio.log.2026-10-17.gz", today));
        assert!(!should_compress("preferences.json", today));
    }

    #[test]
    fn test_compress_file_replaces_original() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("folio.log.2026-10-17");
        fs::write(&path, "{\"level\":\"INFO\"}\n").unwrap();

        compress_file(&path).unwrap();

        assert!(!path.exists());
        let gz = dir.path().join("folio.log.2026-10-17.gz");
        let mut decoded = String::new();
        flate2::read::GzDecoder::new(fs::File::open(gz).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "{\"level\":\"INFO\"}\n");
    }

    #[test]
    fn test_active_log_survives_compression() {
        let dir = tempfile::TempDir::new().unwrap();
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let active = dir.path().join(format!("{LOG_FILE_PREFIX}.{today}"));
        let stale = dir.path().join(format!("{LOG_FILE_PREFIX}.2000-01-01"));
        fs::write(&active, "live\n").unwrap();
        fs::write(&stale, "old\n").unwrap();

        compress_old_logs(dir.path());

        assert_eq!(fs::read_to_string(&active).unwrap(), "live\n");
        assert!(!stale.exists());
        assert!(dir.path().join(format!("{LOG_FILE_PREFIX}.2000-01-01.gz")).exists());
    }

    #[test]
    fn test_default_log_dir() {
        assert_eq!(
            default_log_dir(Some(Path::new("/tmp/folio"))),
            PathBuf::from("/tmp/folio/logs")
        );
        assert_eq!(default_log_dir(None), PathBuf::from("logs"));
    }
}
